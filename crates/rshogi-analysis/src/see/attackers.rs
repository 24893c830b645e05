//! 取り合いに参加する駒の列挙
//!
//! 取られる升から8方向と桂の4升を調べる。隣の升は1マス動ける駒、
//! その先は飛び駒だけを見る。飛び駒の後ろにいる飛び駒は前の駒に依存させる。

use super::{Attacker, MAX_ATTACKERS, See};
use crate::bitboard::{Bitboard, Direction, ray};
use crate::eval::material::exchange_value;
use crate::position::Position;
use crate::types::{Color, Move, Piece, PieceType, Square};

/// 盤端までの距離による調べ方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    /// 盤外
    None,
    /// 隣の升だけ
    Short,
    Long,
}

#[inline]
fn reach(to: Square, dir: Direction) -> Reach {
    match ray(to, dir).count() {
        0 => Reach::None,
        1 => Reach::Short,
        _ => Reach::Long,
    }
}

/// 先手の駒が `dir` へ1マス動けるか
const fn black_steps(pt: PieceType, dir: Direction) -> bool {
    use Direction::*;
    match pt {
        PieceType::Pawn | PieceType::Lance => matches!(dir, Up),
        PieceType::Knight => false,
        PieceType::Silver => matches!(dir, Up | LeftUp | RightUp | LeftDown | RightDown),
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => matches!(dir, Up | Down | Left | Right | LeftUp | RightUp),
        PieceType::Bishop => dir.is_diagonal(),
        PieceType::Rook => !dir.is_diagonal(),
        PieceType::King | PieceType::Horse | PieceType::Dragon => true,
    }
}

/// 駒が `dir` へ1マス動けるか
#[inline]
pub(super) fn can_step(pc: Piece, dir: Direction) -> bool {
    match pc.color() {
        Color::Black => black_steps(pc.piece_type(), dir),
        Color::White => black_steps(pc.piece_type(), dir.reverse()),
    }
}

/// 取られる升から `dir` 方向にいる駒が、飛んで取られる升まで来られるか
#[inline]
pub(super) fn slides_back(pc: Piece, dir: Direction) -> bool {
    match pc.piece_type() {
        PieceType::Bishop | PieceType::Horse => dir.is_diagonal(),
        PieceType::Rook | PieceType::Dragon => !dir.is_diagonal(),
        PieceType::Lance => match pc.color() {
            Color::Black => dir == Direction::Down,
            Color::White => dir == Direction::Up,
        },
        _ => false,
    }
}

impl See {
    /// 取り合いに参加する駒を両方の手番について列挙し、安い順に並べる
    pub(super) fn generate_attackers(&mut self, pos: &Position, mv: Move, shallow: bool) {
        self.arena.clear();
        self.black.clear();
        self.white.clear();

        let to = mv.to();
        let mut occupied = pos.occupied();
        // 動かした駒のいた方向（桂なら None）
        let mut except_dir = None;
        let mut except_square = None;
        if !mv.is_drop() {
            let from = mv.from();
            occupied.clear(from);
            except_dir = Direction::between(to, from);
            except_square = Some(from);
        }

        for dir in Direction::ALL {
            let reach = reach(to, dir);
            if reach == Reach::None {
                continue;
            }
            match (except_dir, except_square) {
                (Some(d), Some(from)) if d == dir => {
                    self.generate_sliders(pos, from, dir, occupied, None, shallow);
                }
                _ => self.generate_direction(pos, to, dir, occupied, reach == Reach::Short, shallow),
            }
        }

        for color in Color::ALL {
            let rank_delta = match color {
                Color::Black => 2,
                Color::White => -2,
            };
            for file_delta in [-1, 1] {
                let Some(sq) = to.offset(file_delta, rank_delta) else {
                    continue;
                };
                if Some(sq) == except_square {
                    continue;
                }
                let pc = pos.piece_on(sq);
                if pc == Piece::new(color, PieceType::Knight) {
                    self.push(color, exchange_value(PieceType::Knight), None);
                }
            }
        }

        let arena = &self.arena;
        self.black.sort_by_key(|&i| arena[i].value);
        self.white.sort_by_key(|&i| arena[i].value);
    }

    /// 隣の升を調べ、空いていれば飛び駒を探す
    fn generate_direction(
        &mut self,
        pos: &Position,
        to: Square,
        dir: Direction,
        occupied: Bitboard,
        short_only: bool,
        shallow: bool,
    ) {
        let (df, dr) = dir.delta();
        let Some(adjacent) = to.offset(df, dr) else {
            return;
        };
        let pc = pos.piece_on(adjacent);
        if pc.is_some() {
            if can_step(pc, dir.reverse()) {
                let idx = self.push(pc.color(), exchange_value(pc.piece_type()), None);
                if !shallow && !short_only {
                    self.generate_sliders(pos, adjacent, dir, occupied, Some(idx), shallow);
                }
            }
            return;
        }
        if !short_only {
            self.generate_sliders(pos, to, dir, occupied, None, shallow);
        }
    }

    /// `start` から `dir` 方向の最初の駒が飛び駒なら登録し、その後ろも調べる
    fn generate_sliders(
        &mut self,
        pos: &Position,
        start: Square,
        dir: Direction,
        occupied: Bitboard,
        depends_on: Option<usize>,
        shallow: bool,
    ) {
        let Some(sq) = Bitboard::nearest_blocker(start, dir, occupied) else {
            return;
        };
        let pc = pos.piece_on(sq);
        if !slides_back(pc, dir) {
            return;
        }
        let idx = self.push(pc.color(), exchange_value(pc.piece_type()), depends_on);
        if !shallow {
            self.generate_sliders(pos, sq, dir, occupied, Some(idx), shallow);
        }
    }

    /// 駒を登録する（1手番あたり `MAX_ATTACKERS` まで）
    pub(super) fn push(&mut self, color: Color, value: i32, depends_on: Option<usize>) -> usize {
        let list = match color {
            Color::Black => &mut self.black,
            Color::White => &mut self.white,
        };
        assert!(list.len() < MAX_ATTACKERS, "too many attackers for {color:?}");
        let idx = self.arena.len();
        self.arena.push(Attacker { value, depends_on, used: false });
        list.push(idx);
        idx
    }
}
