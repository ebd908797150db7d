pub mod backend;
pub mod dialect;
pub mod migration;
pub mod versions;
pub mod migrate;
pub mod driver;
pub mod plan;

pub use dialect::Dialect;
pub use driver::Driver;
pub use migration::{DirectEffect, DirectEffects, Direction, EffectKind, Effects, Migration, TxEffect, TxEffects};
pub use plan::{Migrator, Plan, Report};
pub use versions::TABLE_NAME;
