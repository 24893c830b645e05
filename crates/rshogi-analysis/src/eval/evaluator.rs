//! 評価関数本体
//!
//! 先手玉から見たKPPと後手玉から見たKPP（盤を180度回した座標）の差、
//! および両玉を固定したKKPの和を駒の配置評価とする。
//!
//! 差分計算では、1手で変化する特徴量（消える集合 R と現れる集合 A）について
//! 指した後の全特徴量とのペアを足し引きし、R/A 同士で二重に数えた分を補正する。

use log::{info, warn};
use smallvec::SmallVec;

use super::cache::EvaluateCache;
use super::config::{EvalConfig, InitMode};
use super::feature::{Feature, kpp_index_safe};
use super::material::{evaluate_material, exchange_value, promote_value};
use super::table::FeatureTable;
use super::ValuePair;
use crate::position::Position;
use crate::types::{Color, Move, PieceType, Square, Value};

/// 盤上の玉以外の駒（最大38）と手駒（14）が収まる大きさ
const MAX_FEATURES: usize = 64;
const _: () = assert!(MAX_FEATURES >= 38 + 14);

/// 見積もりの枝刈りマージン（玉の移動）
pub const FUTILITY_KING_MARGIN: i32 = 1000;
/// 見積もりの枝刈りマージン
pub const FUTILITY_MARGIN: i32 = 800;

type FeatureList = SmallVec<[Feature; MAX_FEATURES]>;
type ChangedFeatures = SmallVec<[Feature; 4]>;

/// 評価に使う玉の位置
#[derive(Clone, Copy)]
struct Kings {
    black: Square,
    white: Square,
    black_inv: Square,
    white_inv: Square,
}

impl Kings {
    fn of(pos: &Position) -> Option<Kings> {
        let black = pos.king_square(Color::Black)?;
        let white = pos.king_square(Color::White)?;
        Some(Kings { black, white, black_inv: black.inverse(), white_inv: white.inverse() })
    }
}

/// KPP/KKP評価関数
pub struct Evaluator {
    table: FeatureTable,
    cache: EvaluateCache,
}

impl Evaluator {
    /// 設定に従ってパラメータを用意する（失敗時は警告して0で初期化）
    pub fn new(config: &EvalConfig) -> Evaluator {
        let table = match config.init {
            InitMode::File => load_table(config),
            InitMode::Zero => FeatureTable::zeroed(),
            InitMode::Random { seed } => FeatureTable::random(seed),
        };
        Evaluator::from_table(table, config.cache_bits)
    }

    pub fn from_table(table: FeatureTable, cache_bits: u32) -> Evaluator {
        Evaluator { table, cache: EvaluateCache::new(cache_bits) }
    }

    #[inline]
    pub fn table(&self) -> &FeatureTable {
        &self.table
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// 手番なしハッシュのキャッシュ位置をプリフェッチ
    #[inline]
    pub fn prefetch(&self, no_turn_hash: u64) {
        self.cache.prefetch(no_turn_hash);
    }

    /// 局面を最初から評価する
    pub fn evaluate(&mut self, pos: &Position) -> ValuePair {
        let material = evaluate_material(pos);
        let positional = self.positional(pos);
        self.cache.store(pos.no_turn_hash(), positional);
        ValuePair::new(material, positional)
    }

    /// 1手前の評価値から差分で評価する
    ///
    /// `pos` は `mv` を指した後の局面、`prev` は指す前の局面の評価値。
    pub fn evaluate_diff(&mut self, pos: &Position, prev: ValuePair, mv: Move) -> ValuePair {
        let mover = !pos.side_to_move();
        let material = prev.material() + Value::new(mover.sign() * material_gain(mv));
        let key = pos.no_turn_hash();

        if let Some(positional) = self.cache.probe(key) {
            return ValuePair::new(material, positional);
        }

        let positional = match Kings::of(pos) {
            Some(kings) if !mv.is_king_move() => {
                let (removed, added) = changed_features_after(pos, mv, mover);
                prev.positional() + Value::new(self.diff(pos, kings, &removed, &added))
            }
            _ => self.positional(pos),
        };
        self.cache.store(key, positional);
        ValuePair::new(material, positional)
    }

    /// 指す前の局面で、指し手による評価値の変化を手番側から見て見積もる
    ///
    /// 変化する特徴量のKKPと自己ペアのKPPだけを数える。キャッシュは使わない。
    /// `positional_only` のときは駒割りを除き、枝刈り用のマージンを加える。
    pub fn estimate(&self, pos: &Position, mv: Move, positional_only: bool) -> Value {
        let mover = pos.side_to_move();
        let mut delta = 0;
        if let Some(kings) = Kings::of(pos) {
            let (removed, added) = changed_features_before(pos, mv, mover);
            for f in &added {
                delta += self.kkp_signed(kings, f) + self.pair(kings, f, f);
            }
            for f in &removed {
                delta -= self.kkp_signed(kings, f) + self.pair(kings, f, f);
            }
        }

        let material = if positional_only { 0 } else { mover.sign() * material_gain(mv) };
        let mut value =
            ValuePair::new(Value::new(material), Value::new(delta)).value() * mover.sign();
        if positional_only {
            value += Value::new(if mv.is_king_move() {
                FUTILITY_KING_MARGIN
            } else {
                FUTILITY_MARGIN
            });
        }
        value
    }

    /// 駒の配置評価を最初から計算する（玉がいなければ0）
    fn positional(&self, pos: &Position) -> Value {
        let Some(kings) = Kings::of(pos) else {
            return Value::ZERO;
        };
        let features = collect_features(pos);
        let mut sum = 0;
        for (i, x) in features.iter().enumerate() {
            sum += self.kkp_signed(kings, x);
            for y in &features[..=i] {
                sum += self.pair(kings, x, y);
            }
        }
        Value::new(sum)
    }

    /// 変化した特徴量による配置評価の差分
    fn diff(&self, pos: &Position, kings: Kings, removed: &[Feature], added: &[Feature]) -> i32 {
        let mut sum = 0;

        for f in added {
            sum += self.kkp_signed(kings, f);
        }
        for f in removed {
            sum -= self.kkp_signed(kings, f);
        }

        for l in &collect_features(pos) {
            for a in added {
                sum += self.pair(kings, a, l);
            }
            for r in removed {
                sum -= self.pair(kings, r, l);
            }
        }

        // A 同士は上のループで両方向から数えている
        for (i, a) in added.iter().enumerate() {
            for b in &added[..i] {
                sum -= self.pair(kings, a, b);
            }
        }
        // R 同士（自己ペアを含む）は指した後の局面に残っていない
        for (i, r) in removed.iter().enumerate() {
            for s in &removed[..=i] {
                sum -= self.pair(kings, r, s);
            }
        }
        // R と A のペアは指した後の局面にない
        for r in removed {
            for a in added {
                sum += self.pair(kings, r, a);
            }
        }

        sum
    }

    #[inline]
    fn pair(&self, kings: Kings, x: &Feature, y: &Feature) -> i32 {
        i32::from(self.table.kpp(kings.black, kpp_index_safe(x.b, y.b)))
            - i32::from(self.table.kpp(kings.white_inv, kpp_index_safe(x.w, y.w)))
    }

    #[inline]
    fn kkp_signed(&self, kings: Kings, f: &Feature) -> i32 {
        match f.owner {
            Color::Black => i32::from(self.table.kkp(kings.black, kings.white, f.kkp)),
            Color::White => -i32::from(self.table.kkp(kings.white_inv, kings.black_inv, f.kkp)),
        }
    }
}

/// `eval_file` を読む。なければ `legacy_file` を変換して保存する
fn load_table(config: &EvalConfig) -> FeatureTable {
    match FeatureTable::load(&config.eval_file) {
        Ok(table) => {
            info!("evaluation parameters loaded: {}", config.eval_file.display());
            return table;
        }
        Err(e) => warn!("cannot load {}: {e}", config.eval_file.display()),
    }

    match FeatureTable::load_legacy(&config.legacy_file) {
        Ok(table) => {
            info!("evaluation parameters converted from {}", config.legacy_file.display());
            if let Err(e) = table.save(&config.eval_file) {
                warn!("cannot save {}: {e}", config.eval_file.display());
            }
            table
        }
        Err(e) => {
            warn!(
                "cannot load {}: {e}; evaluation parameters are zero",
                config.legacy_file.display()
            );
            FeatureTable::zeroed()
        }
    }
}

/// 指し手による駒割りの変化（手番側から見た値）
#[inline]
fn material_gain(mv: Move) -> i32 {
    if mv.is_drop() {
        return 0;
    }
    let mut gain = 0;
    if mv.is_promote() {
        gain += promote_value(mv.piece_type());
    }
    if mv.is_capture() {
        gain += exchange_value(mv.captured().piece_type());
    }
    gain
}

/// 局面の全特徴量（手駒は0枚でも数える）
fn collect_features(pos: &Position) -> FeatureList {
    let mut list = FeatureList::new();
    for c in Color::ALL {
        let hand = pos.hand(c);
        for pt in PieceType::HAND_PIECES {
            list.push(Feature::hand(pt, hand.count(pt), c));
        }
    }
    for sq in pos.occupied() {
        let pc = pos.piece_on(sq);
        if pc.piece_type() != PieceType::King {
            list.push(Feature::board(pc.piece_type(), sq, pc.color()));
        }
    }
    list
}

/// 指した後の局面から見た (消えた特徴量, 現れた特徴量)
fn changed_features_after(
    pos: &Position,
    mv: Move,
    mover: Color,
) -> (ChangedFeatures, ChangedFeatures) {
    let mut removed = ChangedFeatures::new();
    let mut added = ChangedFeatures::new();
    let to = mv.to();
    let pt = mv.piece_type();

    if mv.is_drop() {
        let n = pos.hand(mover).count(pt);
        removed.push(Feature::hand(pt, n + 1, mover));
        added.push(Feature::hand(pt, n, mover));
        added.push(Feature::board(pt, to, mover));
        return (removed, added);
    }

    removed.push(Feature::board(pt, mv.from(), mover));
    added.push(Feature::board(mv.piece_type_after(), to, mover));

    if mv.is_capture() {
        let captured = mv.captured().piece_type();
        let h = captured.unpromote();
        let n = pos.hand(mover).count(h);
        removed.push(Feature::board(captured, to, !mover));
        removed.push(Feature::hand(h, n.saturating_sub(1), mover));
        added.push(Feature::hand(h, n, mover));
    }
    (removed, added)
}

/// 指す前の局面から見た (消える特徴量, 現れる特徴量)（玉の移動元・移動先は含まない）
fn changed_features_before(
    pos: &Position,
    mv: Move,
    mover: Color,
) -> (ChangedFeatures, ChangedFeatures) {
    let mut removed = ChangedFeatures::new();
    let mut added = ChangedFeatures::new();
    let to = mv.to();
    let pt = mv.piece_type();

    if mv.is_drop() {
        let n = pos.hand(mover).count(pt);
        removed.push(Feature::hand(pt, n, mover));
        added.push(Feature::hand(pt, n.saturating_sub(1), mover));
        added.push(Feature::board(pt, to, mover));
        return (removed, added);
    }

    if !mv.is_king_move() {
        removed.push(Feature::board(pt, mv.from(), mover));
        added.push(Feature::board(mv.piece_type_after(), to, mover));
    }

    if mv.is_capture() {
        let captured = mv.captured().piece_type();
        let h = captured.unpromote();
        let n = pos.hand(mover).count(h);
        removed.push(Feature::board(captured, to, !mover));
        removed.push(Feature::hand(h, n, mover));
        added.push(Feature::hand(h, n + 1, mover));
    }
    (removed, added)
}
