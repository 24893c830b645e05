//! 置換表の世代管理と置換順序のテスト

use rshogi_analysis::search::NodeStat;
use rshogi_analysis::tt::{AGE_MAX, CLUSTER_SIZE, TranspositionTable};
use rshogi_analysis::types::{Move, Value};

/// 同じクラスターに割り当たるハッシュ
fn same_cluster(i: u64) -> u64 {
    ((i + 1) << 40) | 0x2A
}

fn store(tt: &mut TranspositionTable, hash: u64, depth: i32) -> bool {
    tt.entry(
        hash,
        -Value::INFINITE,
        Value::INFINITE,
        Value::new(depth),
        depth,
        0,
        NodeStat::default(),
        Move::NONE,
    )
}

fn fill_cluster(tt: &mut TranspositionTable, depths: &[i32]) -> Vec<u64> {
    depths
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            let hash = same_cluster(i as u64);
            assert!(store(tt, hash, d));
            hash
        })
        .collect()
}

#[test]
fn test_stale_entry_is_replaced_by_shallower_result() {
    let mut tt = TranspositionTable::new(1);
    let old = fill_cluster(&mut tt, &[10; CLUSTER_SIZE]);

    tt.evolve();
    let fresh = same_cluster(100);
    assert!(store(&mut tt, fresh, 1));
    assert_eq!(tt.get(fresh).map(|e| e.depth()), Some(1));
    assert_eq!(old.iter().filter(|&&h| tt.get(h).is_some()).count(), CLUSTER_SIZE - 1);
}

#[test]
fn test_current_entries_resist_shallower_result() {
    let mut tt = TranspositionTable::new(1);
    fill_cluster(&mut tt, &[5; CLUSTER_SIZE]);

    assert!(!store(&mut tt, same_cluster(100), 5));
    assert!(tt.get(same_cluster(100)).is_none());

    assert!(store(&mut tt, same_cluster(101), 6));
    assert!(tt.get(same_cluster(101)).is_some());
}

#[test]
fn test_shallowest_stale_entry_goes_first() {
    let mut tt = TranspositionTable::new(1);
    let old = fill_cluster(&mut tt, &[4, 2, 8, 6]);

    tt.evolve();
    assert!(store(&mut tt, same_cluster(100), 3));
    assert!(tt.get(old[1]).is_none());
    for &h in [old[0], old[2], old[3]].iter() {
        assert!(tt.get(h).is_some());
    }
}

#[test]
fn test_stale_entries_go_before_current_ones() {
    let mut tt = TranspositionTable::new(1);
    let old = fill_cluster(&mut tt, &[9, 9]);
    tt.evolve();
    // 現世代の浅いエントリは残り、古い世代の深いエントリが消える
    let current = [same_cluster(50), same_cluster(51)];
    for &h in &current {
        assert!(store(&mut tt, h, 1));
    }
    assert!(store(&mut tt, same_cluster(100), 1));
    assert!(current.iter().all(|&h| tt.get(h).is_some()));
    assert_eq!(old.iter().filter(|&&h| tt.get(h).is_some()).count(), 1);
}

#[test]
fn test_age_wraps_around() {
    let mut tt = TranspositionTable::new(1);
    fill_cluster(&mut tt, &[10; CLUSTER_SIZE]);

    for _ in 0..AGE_MAX {
        tt.evolve();
    }
    assert_eq!(tt.age(), 0);
    // 一周すると古いエントリも現世代に見える
    assert!(!store(&mut tt, same_cluster(100), 1));

    tt.evolve();
    assert_eq!(tt.age(), 1);
    assert!(store(&mut tt, same_cluster(100), 1));
}

#[test]
fn test_hashfull_counts_current_generation() {
    let mut tt = TranspositionTable::new(1);
    for i in 0..tt.cluster_count().min(1000) as u64 {
        store(&mut tt, i, 1);
    }
    assert_eq!(tt.hashfull(), 1000 / CLUSTER_SIZE);

    tt.evolve();
    assert_eq!(tt.hashfull(), 0);
}

#[test]
fn test_mate_scores_survive_different_ply() {
    let mut tt = TranspositionTable::new(1);
    let hash = 0xDEAD_BEEF;
    let mut stat = NodeStat::default();
    stat.set_mate_threat();
    tt.entry(hash, -Value::INFINITE, Value::INFINITE, Value::mate_in(10), 3, 4, stat, Move::NONE);

    let e = tt.get(hash).unwrap();
    assert_eq!(e.value(4), Value::mate_in(10));
    assert_eq!(e.value(6), Value::mate_in(12));
    assert!(e.stat().is_mate_threat());
}
