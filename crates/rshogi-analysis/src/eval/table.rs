//! KPP/KKP パラメータテーブル
//!
//! ファイル形式はヘッダなしのリトルエンディアン i16 列で、
//! `kpp[81][KPP_SIZE]` に続けて `kkp[81][81][KKP_MAX]` を並べる。

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::feature::{
    KKP_MAX, KPP_MAX, KPP_SIZE, convert_kkp_index_legacy, convert_kpp_index_legacy, kpp_index,
    kpp_index_safe, legacy_square,
};
use crate::error::EvalFileError;
use crate::types::Square;

const KPP_LEN: usize = Square::NUM * KPP_SIZE;
const KKP_LEN: usize = Square::NUM * Square::NUM * KKP_MAX;

/// ファイルのバイト数
pub const FILE_BYTES: usize = (KPP_LEN + KKP_LEN) * std::mem::size_of::<i16>();

/// 読み書きの単位（i16の個数）
const IO_CHUNK: usize = 1 << 15;

/// 評価パラメータ
pub struct FeatureTable {
    /// [king][kpp_index(x, y)]
    kpp: Box<[i16]>,
    /// [black_king][white_king][index]
    kkp: Box<[i16]>,
}

impl FeatureTable {
    /// 全パラメータ0
    pub fn zeroed() -> FeatureTable {
        FeatureTable {
            kpp: vec![0i16; KPP_LEN].into_boxed_slice(),
            kkp: vec![0i16; KKP_LEN].into_boxed_slice(),
        }
    }

    /// 乱数で初期化する（動作確認用）
    ///
    /// 先手玉が1一にいる行だけを埋め、それ以外は0のまま。
    pub fn random(seed: u64) -> FeatureTable {
        let mut table = FeatureTable::zeroed();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        for v in table.kpp_row_mut(Square::SQ_11) {
            *v = rng.random::<i16>();
        }
        for wk in Square::all() {
            for v in table.kkp_row_mut(Square::SQ_11, wk) {
                *v = rng.random::<i16>();
            }
        }
        debug!("feature table initialized with random seed {seed}");
        table
    }

    #[inline]
    pub fn kpp(&self, king: Square, index: usize) -> i16 {
        self.kpp[king.index() * KPP_SIZE + index]
    }

    #[inline]
    pub fn kkp(&self, black_king: Square, white_king: Square, index: usize) -> i16 {
        self.kkp[kkp_offset(black_king, white_king) + index]
    }

    /// 玉の位置ごとのKPP行
    #[inline]
    pub fn kpp_row(&self, king: Square) -> &[i16] {
        let start = king.index() * KPP_SIZE;
        &self.kpp[start..start + KPP_SIZE]
    }

    #[inline]
    pub fn kkp_row(&self, black_king: Square, white_king: Square) -> &[i16] {
        let start = kkp_offset(black_king, white_king);
        &self.kkp[start..start + KKP_MAX]
    }

    pub fn kpp_row_mut(&mut self, king: Square) -> &mut [i16] {
        let start = king.index() * KPP_SIZE;
        &mut self.kpp[start..start + KPP_SIZE]
    }

    pub fn kkp_row_mut(&mut self, black_king: Square, white_king: Square) -> &mut [i16] {
        let start = kkp_offset(black_king, white_king);
        &mut self.kkp[start..start + KKP_MAX]
    }

    /// KPPの値を設定する（x, y の順は問わない）
    pub fn set_kpp(&mut self, king: Square, x: usize, y: usize, value: i16) {
        self.kpp[king.index() * KPP_SIZE + kpp_index_safe(x, y)] = value;
    }

    pub fn set_kkp(&mut self, black_king: Square, white_king: Square, index: usize, value: i16) {
        self.kkp[kkp_offset(black_king, white_king) + index] = value;
    }

    /// ストリームから読み込む（サイズちょうどでなければエラー）
    pub fn read_from<R: Read>(reader: &mut R) -> Result<FeatureTable, EvalFileError> {
        let mut table = FeatureTable::zeroed();
        let mut consumed = 0usize;
        read_i16_le(reader, &mut table.kpp, &mut consumed)?;
        read_i16_le(reader, &mut table.kkp, &mut consumed)?;

        let mut probe = [0u8; 1];
        if read_full(reader, &mut probe)? != 0 {
            return Err(EvalFileError::TrailingData { expected: FILE_BYTES });
        }
        Ok(table)
    }

    /// ストリームに書き出す
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), EvalFileError> {
        write_i16_le(writer, &self.kpp)?;
        write_i16_le(writer, &self.kkp)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<FeatureTable, EvalFileError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let table = FeatureTable::read_from(&mut reader)?;
        debug!("feature table loaded from {}", path.display());
        Ok(table)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), EvalFileError> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        debug!("feature table saved to {}", path.display());
        Ok(())
    }

    /// 旧形式（Bonanza系の並び）のファイルを読み込んで変換する
    pub fn load_legacy(path: impl AsRef<Path>) -> Result<FeatureTable, EvalFileError> {
        let legacy = FeatureTable::load(path)?;
        Ok(FeatureTable::from_legacy(&legacy))
    }

    /// 旧形式の並びのテーブルを変換する
    ///
    /// 旧形式は玉の升・特徴量番号とも並びが異なるだけで、サイズは同じ。
    pub fn from_legacy(legacy: &FeatureTable) -> FeatureTable {
        let mut table = FeatureTable::zeroed();
        let kpp_map: Vec<usize> = (0..KPP_MAX).map(convert_kpp_index_legacy).collect();
        let kkp_map: Vec<usize> = (0..KKP_MAX).map(convert_kkp_index_legacy).collect();

        for king in Square::all() {
            table.convert_kpp_row(legacy, king, &kpp_map);
        }
        for bk in Square::all() {
            for wk in Square::all() {
                let src = legacy.kkp_row(legacy_king(bk), legacy_king(wk));
                let dst = table.kkp_row_mut(bk, wk);
                for (index, v) in dst.iter_mut().enumerate() {
                    *v = src[kkp_map[index]];
                }
            }
        }
        debug!("feature table converted from legacy layout");
        table
    }

    fn convert_kpp_row(&mut self, legacy: &FeatureTable, king: Square, kpp_map: &[usize]) {
        let src = legacy.kpp_row(legacy_king(king));
        let dst = self.kpp_row_mut(king);
        for x in 0..KPP_MAX {
            let bx = kpp_map[x];
            for y in 0..=x {
                dst[kpp_index(x, y)] = src[kpp_index_safe(bx, kpp_map[y])];
            }
        }
    }
}

impl std::fmt::Debug for FeatureTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureTable")
            .field("kpp_len", &self.kpp.len())
            .field("kkp_len", &self.kkp.len())
            .finish()
    }
}

#[inline]
fn kkp_offset(black_king: Square, white_king: Square) -> usize {
    (black_king.index() * Square::NUM + white_king.index()) * KKP_MAX
}

/// 旧形式での玉の升
#[inline]
fn legacy_king(sq: Square) -> Square {
    Square::from_u8(legacy_square(sq) as u8).unwrap_or(sq)
}

/// EOFまで、またはバッファが埋まるまで読む
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn read_i16_le<R: Read>(
    reader: &mut R,
    dst: &mut [i16],
    consumed: &mut usize,
) -> Result<(), EvalFileError> {
    let mut buf = vec![0u8; IO_CHUNK * 2];
    for chunk in dst.chunks_mut(IO_CHUNK) {
        let bytes = &mut buf[..chunk.len() * 2];
        let n = read_full(reader, bytes)?;
        *consumed += n;
        if n < bytes.len() {
            return Err(EvalFileError::Truncated { expected: FILE_BYTES, actual: *consumed });
        }
        for (v, b) in chunk.iter_mut().zip(bytes.chunks_exact(2)) {
            *v = i16::from_le_bytes([b[0], b[1]]);
        }
    }
    Ok(())
}

fn write_i16_le<W: Write>(writer: &mut W, src: &[i16]) -> io::Result<()> {
    let mut buf = Vec::with_capacity(IO_CHUNK * 2);
    for chunk in src.chunks(IO_CHUNK) {
        buf.clear();
        for v in chunk {
            buf.extend_from_slice(&v.to_le_bytes());
        }
        writer.write_all(&buf)?;
    }
    Ok(())
}
