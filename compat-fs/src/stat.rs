//! Synthetic file metadata.
//!
//! The substrate exposes no real metadata, but many callers only need
//! "does this path exist, and can I treat it as a regular file". The layer
//! therefore answers `stat` for any existing path with one fixed record.

use serde::Serialize;

/// A fixed, non-authoritative metadata record.
///
/// None of these fields reflect the entry's real size, type, or
/// timestamps; they are constant placeholders satisfying callers that only
/// branch on existence. Code that needs real size or time semantics must
/// not consume this record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyntheticStat {
    pub dev: u64,
    pub mode: u32,
    pub nlink: u32,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u64,
    pub blksize: u32,
    pub ino: u64,
    pub size: u64,
    pub blocks: u64,
    pub atime: &'static str,
    pub mtime: &'static str,
    pub ctime: &'static str,
    pub birthtime: &'static str,
}

/// The one record every successful `stat` returns.
pub const SYNTHETIC_STAT: SyntheticStat = SyntheticStat {
    dev: 16777220,
    mode: 33188,
    nlink: 1,
    uid: 501,
    gid: 20,
    rdev: 0,
    blksize: 4096,
    ino: 22488095,
    size: 101,
    blocks: 8,
    atime: "2017-04-02T10:21:33.000Z",
    mtime: "2017-04-02T10:21:31.000Z",
    ctime: "2017-04-02T10:21:31.000Z",
    birthtime: "2017-04-02T10:21:31.000Z",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_a_plausible_regular_file() {
        // 33188 == 0o100644: regular file, rw-r--r--.
        assert_eq!(SYNTHETIC_STAT.mode, 0o100644);
        assert_eq!(SYNTHETIC_STAT.nlink, 1);
    }

    #[test]
    fn serializes_to_the_legacy_json_shape() {
        let json = serde_json::to_value(SYNTHETIC_STAT).unwrap();
        assert_eq!(json["dev"], 16777220);
        assert_eq!(json["mode"], 33188);
        assert_eq!(json["uid"], 501);
        assert_eq!(json["gid"], 20);
        assert_eq!(json["blksize"], 4096);
        assert_eq!(json["ino"], 22488095);
        assert_eq!(json["size"], 101);
        assert_eq!(json["blocks"], 8);
        assert_eq!(json["atime"], "2017-04-02T10:21:33.000Z");
        assert_eq!(json["mtime"], "2017-04-02T10:21:31.000Z");
        assert_eq!(json["birthtime"], "2017-04-02T10:21:31.000Z");
    }
}
