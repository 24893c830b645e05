//! 探索制御用の補助型

mod node_stat;

pub use node_stat::NodeStat;
