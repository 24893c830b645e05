//! ノード単位の探索制御フラグ（NodeStat）
//!
//! 子ノードに「何を試してよいか」を伝えるビット集合。置換表にも `u32` で保存される。

/// 探索制御フラグの集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NodeStat(u32);

impl NodeStat {
    pub const NULL_MOVE: u32 = 0x01;
    pub const RECAPTURE: u32 = 0x02;
    pub const MATE: u32 = 0x04;
    pub const HASH_CUT: u32 = 0x08;
    pub const RECURSION: u32 = 0x10;
    pub const MATE_THREAT: u32 = 0x20;

    /// 詰み脅威以外をすべて許可
    pub const DEFAULT: u32 =
        Self::NULL_MOVE | Self::RECAPTURE | Self::MATE | Self::HASH_CUT | Self::RECURSION;

    #[inline]
    pub const fn new(stat: u32) -> NodeStat {
        NodeStat(stat)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    fn set(&mut self, flag: u32) -> &mut Self {
        self.0 |= flag;
        self
    }

    #[inline]
    fn unset(&mut self, flag: u32) -> &mut Self {
        self.0 &= !flag;
        self
    }

    #[inline]
    const fn is(self, flag: u32) -> bool {
        self.0 & flag != 0
    }
}

macro_rules! node_stat_flag {
    ($flag:ident, $set:ident, $unset:ident, $is:ident) => {
        impl NodeStat {
            #[inline]
            pub fn $set(&mut self) -> &mut Self {
                self.set(Self::$flag)
            }

            #[inline]
            pub fn $unset(&mut self) -> &mut Self {
                self.unset(Self::$flag)
            }

            #[inline]
            pub const fn $is(self) -> bool {
                self.is(Self::$flag)
            }
        }
    };
}

node_stat_flag!(NULL_MOVE, set_null_move, unset_null_move, is_null_move);
node_stat_flag!(RECAPTURE, set_recapture, unset_recapture, is_recapture);
node_stat_flag!(MATE, set_mate, unset_mate, is_mate);
node_stat_flag!(HASH_CUT, set_hash_cut, unset_hash_cut, is_hash_cut);
node_stat_flag!(RECURSION, set_recursion, unset_recursion, is_recursion);
node_stat_flag!(MATE_THREAT, set_mate_threat, unset_mate_threat, is_mate_threat);

impl Default for NodeStat {
    fn default() -> Self {
        NodeStat(Self::DEFAULT)
    }
}

impl From<u32> for NodeStat {
    #[inline]
    fn from(stat: u32) -> NodeStat {
        NodeStat(stat)
    }
}

impl From<NodeStat> for u32 {
    #[inline]
    fn from(stat: NodeStat) -> u32 {
        stat.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let stat = NodeStat::default();
        assert_eq!(u32::from(stat), 0x1F);
        assert!(stat.is_null_move());
        assert!(stat.is_recapture());
        assert!(stat.is_mate());
        assert!(stat.is_hash_cut());
        assert!(stat.is_recursion());
        assert!(!stat.is_mate_threat());
    }

    #[test]
    fn test_chained_updates() {
        let mut stat = NodeStat::default();
        stat.unset_null_move().unset_recursion().set_mate_threat();
        assert!(!stat.is_null_move());
        assert!(!stat.is_recursion());
        assert!(stat.is_mate_threat());
        assert_eq!(stat.raw(), 0x02 | 0x04 | 0x08 | 0x20);
    }

    #[test]
    fn test_copy_is_independent() {
        let parent = NodeStat::default();
        let mut child = parent;
        child.unset_hash_cut();
        assert!(parent.is_hash_cut());
        assert!(!child.is_hash_cut());
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut stat = NodeStat::from(0);
        stat.set_mate().set_mate();
        assert_eq!(stat.raw(), NodeStat::MATE);
        stat.unset_mate().unset_mate();
        assert_eq!(stat.raw(), 0);
    }
}
