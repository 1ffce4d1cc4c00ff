use std::path::PathBuf;

/// Where golden encodings live and whether a run rewrites them.
pub struct GoldenConfig {
    pub update: bool,
    pub dir: PathBuf,
}

impl GoldenConfig {
    /// Fixtures under `tests/fixtures`, rewritten when `PROTOROUTE_UPDATE_GOLDEN` is set.
    pub fn from_env() -> Self {
        Self {
            update: std::env::var_os("PROTOROUTE_UPDATE_GOLDEN").is_some(),
            dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.golden"))
    }

    pub fn read(&self, name: &str) -> Vec<u8> {
        let path = self.path(name);
        std::fs::read(&path)
            .unwrap_or_else(|err| panic!("golden file {} should exist: {err}", path.display()))
    }

    pub fn assert_matches(&self, name: &str, actual: &[u8]) {
        if self.update {
            std::fs::create_dir_all(&self.dir).expect("fixture dir should be creatable");
            std::fs::write(self.path(name), actual).expect("golden file should be writable");
        }
        assert_eq!(self.read(name), actual, "golden mismatch for {name}");
    }
}

pub fn schema_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("proto/protos.proto")
}

pub fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "protoroute-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}
