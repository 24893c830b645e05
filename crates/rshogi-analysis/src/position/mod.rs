//! 局面表現
//!
//! 評価関数とSEEが参照するだけの最小限の局面。合法手生成・王手判定は持たない。

mod sfen;
mod zobrist;

pub use sfen::{SFEN_HIRATE, SfenError};
pub use zobrist::{zobrist_hand, zobrist_psq, zobrist_side};

use crate::bitboard::Bitboard;
use crate::types::{Color, Hand, Move, Piece, PieceType, Square};

/// 局面
#[derive(Clone, Debug)]
pub struct Position {
    board: [Piece; Square::NUM],
    by_color: [Bitboard; Color::NUM],
    /// [PieceType as usize]（0番は未使用）
    by_type: [Bitboard; PieceType::NUM + 1],
    hand: [Hand; Color::NUM],
    king_square: [Option<Square>; Color::NUM],
    side_to_move: Color,
    game_ply: u32,
    board_key: u64,
    hand_key: u64,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// 空の盤面
    pub fn new() -> Position {
        Position {
            board: [Piece::NONE; Square::NUM],
            by_color: [Bitboard::EMPTY; Color::NUM],
            by_type: [Bitboard::EMPTY; PieceType::NUM + 1],
            hand: [Hand::EMPTY; Color::NUM],
            king_square: [None; Color::NUM],
            side_to_move: Color::Black,
            game_ply: 1,
            board_key: 0,
            hand_key: 0,
        }
    }

    /// 平手初期局面
    pub fn startpos() -> Position {
        match Position::from_sfen(SFEN_HIRATE) {
            Ok(pos) => pos,
            Err(e) => unreachable!("hirate sfen must parse: {e}"),
        }
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.board[sq.index()]
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    #[inline]
    pub fn pieces_c(&self, c: Color) -> Bitboard {
        self.by_color[c.index()]
    }

    #[inline]
    pub fn pieces_pt(&self, pt: PieceType) -> Bitboard {
        self.by_type[pt as usize]
    }

    #[inline]
    pub fn pieces(&self, c: Color, pt: PieceType) -> Bitboard {
        self.by_color[c.index()] & self.by_type[pt as usize]
    }

    #[inline]
    pub fn hand(&self, c: Color) -> Hand {
        self.hand[c.index()]
    }

    /// 玉の升（玉が置かれていない局面ではNone）
    #[inline]
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.king_square[c.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    /// 手番を含まないハッシュ（評価値キャッシュのキー）
    #[inline]
    pub fn no_turn_hash(&self) -> u64 {
        self.board_key ^ self.hand_key
    }

    /// 手番込みのハッシュ（置換表のキー）
    #[inline]
    pub fn hash(&self) -> u64 {
        match self.side_to_move {
            Color::Black => self.no_turn_hash(),
            Color::White => self.no_turn_hash() ^ zobrist_side(),
        }
    }

    /// 駒を置く（升は空であること）
    pub fn put_piece(&mut self, pc: Piece, sq: Square) {
        debug_assert!(self.piece_on(sq).is_none());
        self.board[sq.index()] = pc;
        self.by_color[pc.color().index()].set(sq);
        self.by_type[pc.piece_type() as usize].set(sq);
        self.board_key ^= zobrist_psq(pc, sq);
        if pc.piece_type() == PieceType::King {
            self.king_square[pc.color().index()] = Some(sq);
        }
    }

    /// 駒を取り除く（取り除いた駒を返す）
    pub fn remove_piece(&mut self, sq: Square) -> Piece {
        let pc = self.piece_on(sq);
        if pc.is_none() {
            return pc;
        }
        self.board[sq.index()] = Piece::NONE;
        self.by_color[pc.color().index()].clear(sq);
        self.by_type[pc.piece_type() as usize].clear(sq);
        self.board_key ^= zobrist_psq(pc, sq);
        if pc.piece_type() == PieceType::King {
            self.king_square[pc.color().index()] = None;
        }
        pc
    }

    /// 手駒の枚数を設定する
    pub fn set_hand(&mut self, c: Color, pt: PieceType, count: u32) {
        let before = self.hand[c.index()].count(pt);
        let key = zobrist_hand(c, pt);
        self.hand_key = self
            .hand_key
            .wrapping_sub(key.wrapping_mul(before as u64))
            .wrapping_add(key.wrapping_mul(count as u64));
        self.hand[c.index()] = self.hand[c.index()].set(pt, count);
    }

    pub fn set_side_to_move(&mut self, c: Color) {
        self.side_to_move = c;
    }

    /// 指し手で局面を進める（合法性は呼び出し側の責任）
    pub fn do_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let to = mv.to();

        if mv.is_drop() {
            let pt = mv.piece_type();
            let n = self.hand(us).count(pt);
            debug_assert!(n > 0, "drop without hand piece: {mv}");
            self.set_hand(us, pt, n.saturating_sub(1));
            self.put_piece(Piece::new(us, pt), to);
        } else {
            let moved = self.remove_piece(mv.from());
            debug_assert_eq!(moved.piece_type(), mv.piece_type());
            let captured = self.remove_piece(to);
            debug_assert_eq!(captured, mv.captured());
            if captured.is_some() {
                let hpt = captured.piece_type().unpromote();
                let n = self.hand(us).count(hpt);
                self.set_hand(us, hpt, n + 1);
            }
            self.put_piece(Piece::new(us, mv.piece_type_after()), to);
        }

        self.side_to_move = !us;
        self.game_ply += 1;
    }

    /// 先後反転した局面（盤を180度回して駒の色と手番を入れ替える）
    pub fn flipped(&self) -> Position {
        let mut pos = Position::new();
        for sq in self.occupied() {
            pos.put_piece(self.piece_on(sq).flip(), sq.inverse());
        }
        for c in Color::ALL {
            for pt in PieceType::HAND_PIECES {
                pos.set_hand(!c, pt, self.hand(c).count(pt));
            }
        }
        pos.side_to_move = !self.side_to_move;
        pos.game_ply = self.game_ply;
        pos
    }

    /// USI形式の指し手を盤面の情報で補って `Move` にする
    pub fn move_from_usi(&self, usi: &str) -> Option<Move> {
        let us = self.side_to_move;
        if let Some((head, dest)) = usi.split_once('*') {
            let mut chars = head.chars();
            let pt = PieceType::from_usi_char(chars.next()?)?;
            if chars.next().is_some() || !PieceType::HAND_PIECES.contains(&pt) {
                return None;
            }
            let to = Square::from_usi(dest)?;
            if self.piece_on(to).is_some() || !self.hand(us).has(pt) {
                return None;
            }
            return Some(Move::drop(pt, to));
        }

        let (body, promote) = match usi.strip_suffix('+') {
            Some(body) => (body, true),
            None => (usi, false),
        };
        if body.len() != 4 {
            return None;
        }
        let from = Square::from_usi(body.get(0..2)?)?;
        let to = Square::from_usi(body.get(2..4)?)?;
        let pc = self.piece_on(from);
        if pc.is_none() || pc.color() != us {
            return None;
        }
        let captured = self.piece_on(to);
        if captured.is_some() && captured.color() == us {
            return None;
        }
        if promote && !pc.piece_type().can_promote() {
            return None;
        }
        Some(Move::normal(from, to, pc.piece_type(), captured, promote))
    }

    /// その升に置いて行き所のない駒でないか
    pub fn can_stand(pc: Piece, sq: Square) -> bool {
        // 先手から見た段（0が敵陣の一番奥）
        let rank = match pc.color() {
            Color::Black => sq.rank(),
            Color::White => 8 - sq.rank(),
        };
        match pc.piece_type() {
            PieceType::Pawn | PieceType::Lance => rank >= 1,
            PieceType::Knight => rank >= 2,
            _ => true,
        }
    }

    /// 盤上と手駒を含めた局面全体のハッシュを最初から計算し直す
    fn recompute_keys(&mut self) {
        self.board_key = 0;
        for sq in self.occupied() {
            self.board_key ^= zobrist_psq(self.piece_on(sq), sq);
        }
        self.hand_key = 0;
        for c in Color::ALL {
            for pt in PieceType::HAND_PIECES {
                let key = zobrist_hand(c, pt);
                self.hand_key = self
                    .hand_key
                    .wrapping_add(key.wrapping_mul(self.hand(c).count(pt) as u64));
            }
        }
    }
}
