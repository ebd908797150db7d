use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use hashbrown::HashMap;
use crate::db::backend::{Connection, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Apply the forward effect and record the version.
    Up,
    /// Apply the backward effect and remove the version record.
    Down,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => f.write_str("up"),
            Self::Down => f.write_str("down"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(format!("unknown direction {s:?}, expected up or down")),
        }
    }
}

/// Effect run inside the transaction that also updates the version table.
pub trait TxEffect: 'static {
    fn apply(&self, tx: &mut dyn Transaction) -> anyhow::Result<()>;
}

impl<F> TxEffect for F
where
    F: Fn(&mut dyn Transaction) -> anyhow::Result<()> + 'static,
{
    fn apply(&self, tx: &mut dyn Transaction) -> anyhow::Result<()> {
        self(tx)
    }
}

/// Effect run on the live connection, for statements that must not be
/// wrapped in a transaction.
pub trait DirectEffect: 'static {
    fn apply(&self, conn: &mut dyn Connection) -> anyhow::Result<()>;
}

impl<F> DirectEffect for F
where
    F: Fn(&mut dyn Connection) -> anyhow::Result<()> + 'static,
{
    fn apply(&self, conn: &mut dyn Connection) -> anyhow::Result<()> {
        self(conn)
    }
}

#[derive(Default)]
pub struct TxEffects {
    inner: HashMap<Direction, Box<dyn TxEffect>>,
}

impl TxEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up<F>(self, effect: F) -> Self
    where
        F: Fn(&mut dyn Transaction) -> anyhow::Result<()> + 'static,
    {
        self.with(Direction::Up, effect)
    }

    pub fn down<F>(self, effect: F) -> Self
    where
        F: Fn(&mut dyn Transaction) -> anyhow::Result<()> + 'static,
    {
        self.with(Direction::Down, effect)
    }

    pub fn with(mut self, direction: Direction, effect: impl TxEffect) -> Self {
        self.inner.insert(direction, Box::new(effect));
        self
    }

    #[inline]
    pub fn get(&self, direction: Direction) -> Option<&dyn TxEffect> {
        self.inner.get(&direction).map(|effect| &**effect)
    }
}

#[derive(Default)]
pub struct DirectEffects {
    inner: HashMap<Direction, Box<dyn DirectEffect>>,
}

impl DirectEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up<F>(self, effect: F) -> Self
    where
        F: Fn(&mut dyn Connection) -> anyhow::Result<()> + 'static,
    {
        self.with(Direction::Up, effect)
    }

    pub fn down<F>(self, effect: F) -> Self
    where
        F: Fn(&mut dyn Connection) -> anyhow::Result<()> + 'static,
    {
        self.with(Direction::Down, effect)
    }

    pub fn with(mut self, direction: Direction, effect: impl DirectEffect) -> Self {
        self.inner.insert(direction, Box::new(effect));
        self
    }

    #[inline]
    pub fn get(&self, direction: Direction) -> Option<&dyn DirectEffect> {
        self.inner.get(&direction).map(|effect| &**effect)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    None,
    Transactional,
    Direct,
}

/// How a migration changes the database. A migration carries exactly one
/// of these; the executor dispatches on the variant.
#[derive(Default)]
pub enum Effects {
    /// Nothing runs and the version table is left untouched.
    #[default]
    None,
    Transactional(TxEffects),
    Direct(DirectEffects),
}

impl Effects {
    pub fn kind(&self) -> EffectKind {
        match self {
            Self::None => EffectKind::None,
            Self::Transactional(_) => EffectKind::Transactional,
            Self::Direct(_) => EffectKind::Direct,
        }
    }
}

impl From<TxEffects> for Effects {
    #[inline]
    fn from(value: TxEffects) -> Self {
        Self::Transactional(value)
    }
}

impl From<DirectEffects> for Effects {
    #[inline]
    fn from(value: DirectEffects) -> Self {
        Self::Direct(value)
    }
}

pub struct Migration {
    id: String,
    effects: Effects,
}

impl Migration {
    /// `id` must sort in application order, e.g. `20240131120000_add_users`.
    pub fn new(id: impl Into<String>, effects: impl Into<Effects>) -> Self {
        Self {
            id: id.into(),
            effects: effects.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn effects(&self) -> &Effects {
        &self.effects
    }
}

impl Debug for Migration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migration")
            .field("id", &self.id)
            .field("effects", &self.effects.kind())
            .finish()
    }
}
