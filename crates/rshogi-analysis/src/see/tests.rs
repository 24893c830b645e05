//! SEEのテスト（先手玉9九・後手玉1一の局面で5筋周辺の取り合いを見る）

use super::*;
use crate::types::Value;

fn full_window() -> (Value, Value) {
    (-Value::PIECE_INF, Value::PIECE_INF)
}

fn see(sfen: &str, usi: &str) -> i32 {
    let pos = Position::from_sfen(sfen).unwrap();
    let mv = pos.move_from_usi(usi).unwrap();
    let (alpha, beta) = full_window();
    See::new().search(&pos, mv, alpha, beta).raw()
}

fn see_shallow(sfen: &str, usi: &str) -> i32 {
    let pos = Position::from_sfen(sfen).unwrap();
    let mv = pos.move_from_usi(usi).unwrap();
    let (alpha, beta) = full_window();
    See::new().search_shallow(&pos, mv, alpha, beta).raw()
}

#[test]
fn test_see_undefended_pawn() {
    let sfen = "8k/9/9/9/4p4/4G4/9/9/K8 b - 1";
    assert_eq!(see(sfen, "5f5e"), exchange_value(crate::types::PieceType::Pawn));
    assert_eq!(see(sfen, "5f5e"), 180);
}

#[test]
fn test_see_single_recapture_is_taken() {
    // 歩で銀を取り、飛車に取り返される
    let sfen = "4r3k/9/9/9/4s4/4P4/9/9/K8 b - 1";
    assert_eq!(see(sfen, "5f5e"), 990 - 180);
}

#[test]
fn test_see_losing_capture() {
    // 飛車で金に守られた歩を取る
    let sfen = "8k/9/9/4g4/4p4/9/9/4R4/K8 b - 1";
    assert_eq!(see(sfen, "5h5e"), 180 - 1980);
}

#[test]
fn test_see_xray_behind_defender() {
    // 後手の歩の後ろに飛車がいる
    let sfen = "4r3k/9/4p4/4g4/4PS3/9/9/9/K8 b - 1";
    assert_eq!(see(sfen, "4e5d"), 1080 - 990);
    // 簡易版は飛車を見ない
    assert_eq!(see_shallow(sfen, "4e5d"), 1080 - 990 + 180);
}

#[test]
fn test_see_rescans_behind_mover() {
    let with_rook = "8k/9/4g4/4p4/4P4/9/9/4R4/K8 b - 1";
    assert_eq!(see(with_rook, "5e5d"), 180);
    assert_eq!(see_shallow(with_rook, "5e5d"), 180);

    let without_rook = "8k/9/4g4/4p4/4P4/9/9/9/K8 b - 1";
    assert_eq!(see(without_rook, "5e5d"), 0);
}

#[test]
fn test_see_lance_direction() {
    // 先手の香は下向きには利かない
    assert_eq!(see("8k/4L4/9/4p4/4P4/9/9/9/K8 b - 1", "5e5d"), 180);
    assert_eq!(see("8k/4l4/9/4p4/4P4/9/9/9/K8 b - 1", "5e5d"), 0);
}

#[test]
fn test_see_knights() {
    assert_eq!(see("8k/3n5/9/4p4/4P4/9/9/9/K8 b - 1", "5e5d"), 0);
    // 後手番: 金で歩を取ると桂で取り返される
    assert_eq!(see("8k/9/9/4g4/4P4/9/5N3/9/K8 w - 1", "5d5e"), 180 - 1080);
}

#[test]
fn test_see_drop() {
    assert_eq!(see("8k/9/4p4/9/9/9/9/9/K8 b G 1", "G*5d"), -1080);
    assert_eq!(see("8k/9/4p4/9/9/9/9/9/K8 b G 1", "G*5e"), 0);
}

#[test]
fn test_see_promotion_uses_unpromoted_attacker() {
    // 成っても取られる駒の価値は成る前の銀として数える
    let sfen = "8k/4g4/4p4/4S4/9/9/9/9/K8 b - 1";
    assert_eq!(see(sfen, "5d5c+"), 180 - 990);
}

#[test]
fn test_see_promoted_mover_keeps_promoted_value() {
    // 龍・馬・と金が成らずに取る手は成った駒の価値で数える
    assert_eq!(see("8k/9/9/4g4/4p4/9/9/4+R4/K8 b - 1", "5h5e"), 180 - (1395 + 990));
    assert_eq!(see("8k/9/9/4g4/4p4/9/6+B2/9/K8 b - 1", "3g5e"), 180 - (945 + 855));
    assert_eq!(see("8k/9/9/4g4/4p4/4+P4/9/9/K8 b - 1", "5f5e"), 180 - (540 + 90));
}

#[test]
fn test_see_dragon_takes_gold_defended_by_pawn() {
    let sfen = "2p6/2g5g/9/4L4/1+R+R2+r3/5p3/9/+P8/9 b - 1";
    assert_eq!(see(sfen, "7e7b"), 1080 - (1395 + 990));
    assert_eq!(see_shallow(sfen, "7e7b"), -1305);
}

#[test]
fn test_see_window_cutoffs() {
    let pos = Position::from_sfen("8k/9/9/9/4p4/4G4/9/9/K8 b - 1").unwrap();
    let mv = pos.move_from_usi("5f5e").unwrap();
    let mut see = See::new();
    assert_eq!(see.search(&pos, mv, Value::new(200), Value::PIECE_INF), Value::new(200));

    let pos = Position::from_sfen("4r3k/9/9/9/4s4/4P4/9/9/K8 b - 1").unwrap();
    let mv = pos.move_from_usi("5f5e").unwrap();
    assert_eq!(see.search(&pos, mv, -Value::PIECE_INF, Value::new(500)), Value::new(500));
}

#[test]
fn test_see_reuse_gives_same_result() {
    let pos = Position::from_sfen("4r3k/9/4p4/4g4/4PS3/9/9/9/K8 b - 1").unwrap();
    let mv = pos.move_from_usi("4e5d").unwrap();
    let (alpha, beta) = full_window();
    let mut see = See::new();
    let first = see.search(&pos, mv, alpha, beta);
    let second = see.search(&pos, mv, alpha, beta);
    assert_eq!(first, second);
}

#[test]
fn test_attackers_are_sorted_by_value() {
    let pos = Position::from_sfen("4r3k/9/4p4/4g4/4PS3/9/9/9/K8 b - 1").unwrap();
    let mv = pos.move_from_usi("4e5d").unwrap();
    let mut see = See::new();
    see.generate_attackers(&pos, mv, false);
    assert_eq!(see.black.len(), 1);
    assert_eq!(see.white.len(), 2);
    let values: Vec<i32> = see.white.iter().map(|&i| see.arena[i].value).collect();
    assert_eq!(values, vec![180, 1980]);
    let rook = see.white[1];
    assert_eq!(see.arena[rook].depends_on, Some(see.white[0]));
}

#[test]
#[should_panic(expected = "too many attackers")]
fn test_attacker_overflow_panics() {
    let mut see = See::new();
    for _ in 0..=MAX_ATTACKERS {
        see.push(Color::Black, 180, None);
    }
}
