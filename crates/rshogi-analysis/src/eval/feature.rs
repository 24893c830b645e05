//! KPP/KKP 特徴量のインデックス
//!
//! 特徴量は駒種・先後ごとの連続した帯（band）に割り当てる。
//! 歩・香・桂は行き所のない段を詰めて番号を振り直す。
//!
//! 帯の並び（KPP）:
//! 手駒 歩(19) 香/桂/銀/金(5) 角/飛(3) を先後交互、
//! 盤上 歩(72) 香(72) 桂(63) 銀/金/角/馬/飛/龍(81) を先後交互。
//! KKP は先後の区別なしで同じ並び。

use crate::types::{Color, PieceType, Square};

pub const KPP_HBPAWN: usize = 0;
pub const KPP_HWPAWN: usize = KPP_HBPAWN + 19;
pub const KPP_HBLANCE: usize = KPP_HWPAWN + 19;
pub const KPP_HWLANCE: usize = KPP_HBLANCE + 5;
pub const KPP_HBKNIGHT: usize = KPP_HWLANCE + 5;
pub const KPP_HWKNIGHT: usize = KPP_HBKNIGHT + 5;
pub const KPP_HBSILVER: usize = KPP_HWKNIGHT + 5;
pub const KPP_HWSILVER: usize = KPP_HBSILVER + 5;
pub const KPP_HBGOLD: usize = KPP_HWSILVER + 5;
pub const KPP_HWGOLD: usize = KPP_HBGOLD + 5;
pub const KPP_HBBISHOP: usize = KPP_HWGOLD + 5;
pub const KPP_HWBISHOP: usize = KPP_HBBISHOP + 3;
pub const KPP_HBROOK: usize = KPP_HWBISHOP + 3;
pub const KPP_HWROOK: usize = KPP_HBROOK + 3;
pub const KPP_BBPAWN: usize = KPP_HWROOK + 3;
pub const KPP_BWPAWN: usize = KPP_BBPAWN + 81 - 9;
pub const KPP_BBLANCE: usize = KPP_BWPAWN + 81 - 9;
pub const KPP_BWLANCE: usize = KPP_BBLANCE + 81 - 9;
pub const KPP_BBKNIGHT: usize = KPP_BWLANCE + 81 - 9;
pub const KPP_BWKNIGHT: usize = KPP_BBKNIGHT + 81 - 18;
pub const KPP_BBSILVER: usize = KPP_BWKNIGHT + 81 - 18;
pub const KPP_BWSILVER: usize = KPP_BBSILVER + 81;
pub const KPP_BBGOLD: usize = KPP_BWSILVER + 81;
pub const KPP_BWGOLD: usize = KPP_BBGOLD + 81;
pub const KPP_BBBISHOP: usize = KPP_BWGOLD + 81;
pub const KPP_BWBISHOP: usize = KPP_BBBISHOP + 81;
pub const KPP_BBHORSE: usize = KPP_BWBISHOP + 81;
pub const KPP_BWHORSE: usize = KPP_BBHORSE + 81;
pub const KPP_BBROOK: usize = KPP_BWHORSE + 81;
pub const KPP_BWROOK: usize = KPP_BBROOK + 81;
pub const KPP_BBDRAGON: usize = KPP_BWROOK + 81;
pub const KPP_BWDRAGON: usize = KPP_BBDRAGON + 81;
pub const KPP_MAX: usize = KPP_BWDRAGON + 81;
/// 三角行列に詰めたペア数
pub const KPP_SIZE: usize = KPP_MAX * (KPP_MAX + 1) / 2;

pub const KKP_HPAWN: usize = 0;
pub const KKP_HLANCE: usize = KKP_HPAWN + 19;
pub const KKP_HKNIGHT: usize = KKP_HLANCE + 5;
pub const KKP_HSILVER: usize = KKP_HKNIGHT + 5;
pub const KKP_HGOLD: usize = KKP_HSILVER + 5;
pub const KKP_HBISHOP: usize = KKP_HGOLD + 5;
pub const KKP_HROOK: usize = KKP_HBISHOP + 3;
pub const KKP_BPAWN: usize = KKP_HROOK + 3;
pub const KKP_BLANCE: usize = KKP_BPAWN + 81 - 9;
pub const KKP_BKNIGHT: usize = KKP_BLANCE + 81 - 9;
pub const KKP_BSILVER: usize = KKP_BKNIGHT + 81 - 18;
pub const KKP_BGOLD: usize = KKP_BSILVER + 81;
pub const KKP_BBISHOP: usize = KKP_BGOLD + 81;
pub const KKP_BHORSE: usize = KKP_BBISHOP + 81;
pub const KKP_BROOK: usize = KKP_BHORSE + 81;
pub const KKP_BDRAGON: usize = KKP_BROOK + 81;
pub const KKP_MAX: usize = KKP_BDRAGON + 81;

/// 三角行列のインデックス（x >= y）
#[inline]
pub const fn kpp_index(x: usize, y: usize) -> usize {
    debug_assert!(x >= y);
    x * (x + 1) / 2 + y
}

/// 大小を問わない三角行列のインデックス
#[inline]
pub const fn kpp_index_safe(x: usize, y: usize) -> usize {
    if x >= y { kpp_index(x, y) } else { kpp_index(y, x) }
}

/// 段の範囲を制限した升番号の詰め直し
///
/// 筋ごとに `lo..=hi` 段だけを連番にする。範囲外の升は `None`。
#[derive(Debug)]
pub struct SquareRemap {
    lo: u8,
    hi: u8,
    table: [Option<u8>; Square::NUM],
}

impl SquareRemap {
    const fn new(lo: u8, hi: u8) -> SquareRemap {
        let width = hi - lo + 1;
        let mut table = [None; Square::NUM];
        let mut sq = 0;
        while sq < Square::NUM {
            let file = (sq / 9) as u8;
            let rank = (sq % 9) as u8;
            if rank >= lo && rank <= hi {
                table[sq] = Some(file * width + (rank - lo));
            }
            sq += 1;
        }
        SquareRemap { lo, hi, table }
    }

    /// 詰め直した後の升の数
    #[inline]
    pub const fn len(&self) -> usize {
        9 * (self.hi - self.lo + 1) as usize
    }

    #[inline]
    pub fn index(&self, sq: Square) -> Option<usize> {
        self.table[sq.index()].map(usize::from)
    }

    /// `index` の逆変換
    #[inline]
    pub fn square(&self, offset: usize) -> Square {
        debug_assert!(offset < self.len());
        let width = (self.hi - self.lo + 1) as usize;
        Square::new((offset / width) as u8, (offset % width) as u8 + self.lo)
    }
}

/// 先手の歩・香（1段目なし）
pub static REMAP_BPAWN: SquareRemap = SquareRemap::new(1, 8);
/// 後手の歩・香（9段目なし）
pub static REMAP_WPAWN: SquareRemap = SquareRemap::new(0, 7);
/// 先手の桂（1,2段目なし）
pub static REMAP_BKNIGHT: SquareRemap = SquareRemap::new(2, 8);
/// 後手の桂（8,9段目なし）
pub static REMAP_WKNIGHT: SquareRemap = SquareRemap::new(0, 6);
/// 制限なし
pub static REMAP_NORMAL: SquareRemap = SquareRemap::new(0, 8);

/// 盤上の駒の帯
struct BoardBand {
    kpp_black: usize,
    kpp_white: usize,
    kkp: usize,
    remap_black: &'static SquareRemap,
    remap_white: &'static SquareRemap,
}

fn board_band(pt: PieceType) -> BoardBand {
    let (kpp_black, kpp_white, kkp, remap_black, remap_white) = match pt {
        PieceType::Pawn => (KPP_BBPAWN, KPP_BWPAWN, KKP_BPAWN, &REMAP_BPAWN, &REMAP_WPAWN),
        PieceType::Lance => (KPP_BBLANCE, KPP_BWLANCE, KKP_BLANCE, &REMAP_BPAWN, &REMAP_WPAWN),
        PieceType::Knight => {
            (KPP_BBKNIGHT, KPP_BWKNIGHT, KKP_BKNIGHT, &REMAP_BKNIGHT, &REMAP_WKNIGHT)
        }
        PieceType::Silver => (KPP_BBSILVER, KPP_BWSILVER, KKP_BSILVER, &REMAP_NORMAL, &REMAP_NORMAL),
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => (KPP_BBGOLD, KPP_BWGOLD, KKP_BGOLD, &REMAP_NORMAL, &REMAP_NORMAL),
        PieceType::Bishop => (KPP_BBBISHOP, KPP_BWBISHOP, KKP_BBISHOP, &REMAP_NORMAL, &REMAP_NORMAL),
        PieceType::Horse => (KPP_BBHORSE, KPP_BWHORSE, KKP_BHORSE, &REMAP_NORMAL, &REMAP_NORMAL),
        PieceType::Rook => (KPP_BBROOK, KPP_BWROOK, KKP_BROOK, &REMAP_NORMAL, &REMAP_NORMAL),
        PieceType::Dragon => (KPP_BBDRAGON, KPP_BWDRAGON, KKP_BDRAGON, &REMAP_NORMAL, &REMAP_NORMAL),
        PieceType::King => unreachable!("king has no board feature"),
    };
    BoardBand { kpp_black, kpp_white, kkp, remap_black, remap_white }
}

/// 手駒の帯 (KPP先手, KPP後手, KKP)。成駒は成る前の駒の帯を使う
fn hand_band(pt: PieceType) -> (usize, usize, usize) {
    match pt.unpromote() {
        PieceType::Pawn => (KPP_HBPAWN, KPP_HWPAWN, KKP_HPAWN),
        PieceType::Lance => (KPP_HBLANCE, KPP_HWLANCE, KKP_HLANCE),
        PieceType::Knight => (KPP_HBKNIGHT, KPP_HWKNIGHT, KKP_HKNIGHT),
        PieceType::Silver => (KPP_HBSILVER, KPP_HWSILVER, KKP_HSILVER),
        PieceType::Gold => (KPP_HBGOLD, KPP_HWGOLD, KKP_HGOLD),
        PieceType::Bishop => (KPP_HBBISHOP, KPP_HWBISHOP, KKP_HBISHOP),
        PieceType::Rook => (KPP_HBROOK, KPP_HWROOK, KKP_HROOK),
        _ => unreachable!("king has no hand feature"),
    }
}

#[inline]
fn remapped(remap: &SquareRemap, pt: PieceType, sq: Square) -> usize {
    match remap.index(sq) {
        Some(i) => i,
        None => unreachable!("{pt:?} cannot stand on {sq}"),
    }
}

/// 盤上の駒のKPPインデックス（`owner` の帯、`sq` は帯の向きで見た升）
#[inline]
pub fn kpp_board_index(pt: PieceType, sq: Square, owner: Color) -> usize {
    let band = board_band(pt);
    match owner {
        Color::Black => band.kpp_black + remapped(band.remap_black, pt, sq),
        Color::White => band.kpp_white + remapped(band.remap_white, pt, sq),
    }
}

/// 手駒のKPPインデックスの先頭（枚数0の位置）
#[inline]
pub fn kpp_hand_index(pt: PieceType, owner: Color) -> usize {
    let (black, white, _) = hand_band(pt);
    match owner {
        Color::Black => black,
        Color::White => white,
    }
}

/// 盤上の駒のKKPインデックス（常に先手の向き）
#[inline]
pub fn kkp_board_index(pt: PieceType, sq: Square) -> usize {
    let band = board_band(pt);
    band.kkp + remapped(band.remap_black, pt, sq)
}

/// 手駒のKKPインデックスの先頭（枚数0の位置）
#[inline]
pub fn kkp_hand_index(pt: PieceType) -> usize {
    hand_band(pt).2
}

/// 1つの特徴量（先手玉から見たKPP番号・後手玉から見たKPP番号・KKP番号）
///
/// 後手の駒は盤を180度回して「後手玉から見た先手の駒」として数える。
/// `kkp` は `owner` の玉から見た向きで、評価時に `owner` の符号を掛ける。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub b: usize,
    pub w: usize,
    pub kkp: usize,
    pub owner: Color,
}

impl Feature {
    /// 盤上の駒
    #[inline]
    pub fn board(pt: PieceType, sq: Square, owner: Color) -> Feature {
        match owner {
            Color::Black => Feature {
                b: kpp_board_index(pt, sq, Color::Black),
                w: kpp_board_index(pt, sq.inverse(), Color::White),
                kkp: kkp_board_index(pt, sq),
                owner,
            },
            Color::White => Feature {
                b: kpp_board_index(pt, sq, Color::White),
                w: kpp_board_index(pt, sq.inverse(), Color::Black),
                kkp: kkp_board_index(pt, sq.inverse()),
                owner,
            },
        }
    }

    /// `owner` の手駒の `pt` が `count` 枚
    #[inline]
    pub fn hand(pt: PieceType, count: u32, owner: Color) -> Feature {
        let c = count as usize;
        Feature {
            b: kpp_hand_index(pt, owner) + c,
            w: kpp_hand_index(pt, !owner) + c,
            kkp: kkp_hand_index(pt) + c,
            owner,
        }
    }
}

/// 盤上の帯1本（旧形式変換・左右反転用）
struct Segment {
    begin: usize,
    remap: &'static SquareRemap,
    /// 旧形式で詰める量
    legacy_offset: usize,
}

impl Segment {
    #[inline]
    fn end(&self) -> usize {
        self.begin + self.remap.len()
    }
}

static KPP_SEGMENTS: [Segment; 18] = [
    Segment { begin: KPP_BBPAWN, remap: &REMAP_BPAWN, legacy_offset: 9 },
    Segment { begin: KPP_BWPAWN, remap: &REMAP_WPAWN, legacy_offset: 0 },
    Segment { begin: KPP_BBLANCE, remap: &REMAP_BPAWN, legacy_offset: 9 },
    Segment { begin: KPP_BWLANCE, remap: &REMAP_WPAWN, legacy_offset: 0 },
    Segment { begin: KPP_BBKNIGHT, remap: &REMAP_BKNIGHT, legacy_offset: 18 },
    Segment { begin: KPP_BWKNIGHT, remap: &REMAP_WKNIGHT, legacy_offset: 0 },
    Segment { begin: KPP_BBSILVER, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BWSILVER, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BBGOLD, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BWGOLD, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BBBISHOP, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BWBISHOP, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BBHORSE, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BWHORSE, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BBROOK, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BWROOK, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BBDRAGON, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KPP_BWDRAGON, remap: &REMAP_NORMAL, legacy_offset: 0 },
];

static KKP_SEGMENTS: [Segment; 9] = [
    Segment { begin: KKP_BPAWN, remap: &REMAP_BPAWN, legacy_offset: 9 },
    Segment { begin: KKP_BLANCE, remap: &REMAP_BPAWN, legacy_offset: 9 },
    Segment { begin: KKP_BKNIGHT, remap: &REMAP_BKNIGHT, legacy_offset: 18 },
    Segment { begin: KKP_BSILVER, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KKP_BGOLD, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KKP_BBISHOP, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KKP_BHORSE, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KKP_BROOK, remap: &REMAP_NORMAL, legacy_offset: 0 },
    Segment { begin: KKP_BDRAGON, remap: &REMAP_NORMAL, legacy_offset: 0 },
];

/// 旧形式（Bonanza系）の升番号: 段 * 9 + 9筋からの筋
#[inline]
pub fn legacy_square(sq: Square) -> usize {
    sq.rank() as usize * 9 + (8 - sq.file() as usize)
}

fn find_segment(segments: &'static [Segment], index: usize) -> &'static Segment {
    match segments.iter().find(|s| s.begin <= index && index < s.end()) {
        Some(seg) => seg,
        None => unreachable!("feature index {index} is out of range"),
    }
}

fn convert_legacy(segments: &'static [Segment], hand_end: usize, index: usize) -> usize {
    if index < hand_end {
        return index;
    }
    let seg = find_segment(segments, index);
    let sq = seg.remap.square(index - seg.begin);
    seg.begin + legacy_square(sq) - seg.legacy_offset
}

fn symmetrize(segments: &'static [Segment], hand_end: usize, index: usize) -> usize {
    if index < hand_end {
        return index;
    }
    let seg = find_segment(segments, index);
    let sq = seg.remap.square(index - seg.begin).mirror();
    seg.begin + remapped(seg.remap, PieceType::Pawn, sq)
}

/// KPPの特徴量番号を旧形式の並びに変換する
pub fn convert_kpp_index_legacy(index: usize) -> usize {
    convert_legacy(&KPP_SEGMENTS, KPP_BBPAWN, index)
}

/// KKPの特徴量番号を旧形式の並びに変換する
pub fn convert_kkp_index_legacy(index: usize) -> usize {
    convert_legacy(&KKP_SEGMENTS, KKP_BPAWN, index)
}

/// KPPの特徴量番号を左右反転する
pub fn symmetrize_kpp_index(index: usize) -> usize {
    symmetrize(&KPP_SEGMENTS, KPP_BBPAWN, index)
}

/// KKPの特徴量番号を左右反転する
pub fn symmetrize_kkp_index(index: usize) -> usize {
    symmetrize(&KKP_SEGMENTS, KKP_BPAWN, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_sizes() {
        assert_eq!(KPP_BBPAWN, 90);
        assert_eq!(KPP_MAX, 1476);
        assert_eq!(KPP_SIZE, 1_090_026);
        assert_eq!(KKP_BPAWN, 45);
        assert_eq!(KKP_MAX, 738);
        assert_eq!(KPP_SEGMENTS[17].end(), KPP_MAX);
        assert_eq!(KKP_SEGMENTS[8].end(), KKP_MAX);
    }

    #[test]
    fn test_segments_are_contiguous() {
        for pair in KPP_SEGMENTS.windows(2) {
            assert_eq!(pair[0].end(), pair[1].begin);
        }
        for pair in KKP_SEGMENTS.windows(2) {
            assert_eq!(pair[0].end(), pair[1].begin);
        }
    }

    #[test]
    fn test_remap_covers_each_square_once() {
        for remap in [&REMAP_BPAWN, &REMAP_WPAWN, &REMAP_BKNIGHT, &REMAP_WKNIGHT, &REMAP_NORMAL] {
            let mut seen = vec![false; remap.len()];
            for sq in Square::all() {
                if let Some(i) = remap.index(sq) {
                    assert!(!seen[i]);
                    seen[i] = true;
                    assert_eq!(remap.square(i), sq);
                }
            }
            assert!(seen.iter().all(|&s| s));
        }
        assert_eq!(REMAP_BPAWN.index(Square::new(0, 0)), None);
        assert_eq!(REMAP_BPAWN.index(Square::new(0, 1)), Some(0));
        assert_eq!(REMAP_WPAWN.index(Square::new(0, 8)), None);
        assert_eq!(REMAP_BKNIGHT.index(Square::new(1, 2)), Some(7));
        assert_eq!(REMAP_WKNIGHT.index(Square::new(0, 7)), None);
    }

    #[test]
    fn test_kpp_index_triangle() {
        assert_eq!(kpp_index(0, 0), 0);
        assert_eq!(kpp_index(1, 0), 1);
        assert_eq!(kpp_index(1, 1), 2);
        assert_eq!(kpp_index(2, 0), 3);
        assert_eq!(kpp_index_safe(3, 7), kpp_index(7, 3));
        assert_eq!(kpp_index(KPP_MAX - 1, KPP_MAX - 1), KPP_SIZE - 1);
    }

    #[test]
    fn test_promoted_pieces_share_gold_band() {
        let sq = Square::SQ_55;
        let gold = kpp_board_index(PieceType::Gold, sq, Color::Black);
        for pt in [PieceType::ProPawn, PieceType::ProLance, PieceType::ProKnight, PieceType::ProSilver] {
            assert_eq!(kpp_board_index(pt, sq, Color::Black), gold);
            assert_eq!(kkp_board_index(pt, sq), kkp_board_index(PieceType::Gold, sq));
        }
        assert_ne!(kpp_board_index(PieceType::Horse, sq, Color::Black), kpp_board_index(PieceType::Bishop, sq, Color::Black));
        assert_eq!(kpp_hand_index(PieceType::Dragon, Color::White), KPP_HWROOK);
    }

    #[test]
    fn test_feature_color_symmetry() {
        let sq = Square::new(2, 6);
        let black = Feature::board(PieceType::Knight, sq, Color::Black);
        let white = Feature::board(PieceType::Knight, sq.inverse(), Color::White);
        assert_eq!(black.b, white.w);
        assert_eq!(black.w, white.b);
        assert_eq!(black.kkp, white.kkp);

        let hb = Feature::hand(PieceType::Silver, 2, Color::Black);
        let hw = Feature::hand(PieceType::Silver, 2, Color::White);
        assert_eq!(hb.b, hw.w);
        assert_eq!(hb.w, hw.b);
        assert_eq!(hb.kkp, hw.kkp);
    }

    #[test]
    fn test_legacy_conversion_is_bijection() {
        let mut seen = vec![false; KPP_MAX];
        for i in 0..KPP_MAX {
            let j = convert_kpp_index_legacy(i);
            assert!(j < KPP_MAX);
            assert!(!seen[j], "kpp legacy index {j} hit twice");
            seen[j] = true;
        }
        let mut seen = vec![false; KKP_MAX];
        for i in 0..KKP_MAX {
            let j = convert_kkp_index_legacy(i);
            assert!(!seen[j], "kkp legacy index {j} hit twice");
            seen[j] = true;
        }
    }

    #[test]
    fn test_legacy_conversion_stays_in_band() {
        for seg in &KPP_SEGMENTS {
            for i in seg.begin..seg.end() {
                let j = convert_kpp_index_legacy(i);
                assert!(seg.begin <= j && j < seg.end(), "kpp {i} -> {j}");
            }
        }
        for seg in &KKP_SEGMENTS {
            for i in seg.begin..seg.end() {
                let j = convert_kkp_index_legacy(i);
                assert!(seg.begin <= j && j < seg.end(), "kkp {i} -> {j}");
            }
        }
        // 手駒はそのまま
        assert_eq!(convert_kpp_index_legacy(KPP_HWROOK + 2), KPP_HWROOK + 2);
    }

    #[test]
    fn test_legacy_square_layout() {
        // 9一 が 0、1一 が 8、1九 が 80
        assert_eq!(legacy_square(Square::new(8, 0)), 0);
        assert_eq!(legacy_square(Square::new(0, 0)), 8);
        assert_eq!(legacy_square(Square::SQ_99), 72);
        assert_eq!(legacy_square(Square::new(0, 8)), 80);
    }

    #[test]
    fn test_symmetrize_is_involution() {
        for i in 0..KPP_MAX {
            assert_eq!(symmetrize_kpp_index(symmetrize_kpp_index(i)), i);
        }
        for i in 0..KKP_MAX {
            assert_eq!(symmetrize_kkp_index(symmetrize_kkp_index(i)), i);
        }
        let sq = Square::new(1, 4);
        assert_eq!(
            symmetrize_kpp_index(kpp_board_index(PieceType::Rook, sq, Color::Black)),
            kpp_board_index(PieceType::Rook, sq.mirror(), Color::Black)
        );
    }
}
