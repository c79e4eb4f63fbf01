//! Particle files on disk.
//!
//! A particle file is the raw byte image of a `[ParticleBlock]` slice, in the
//! same structure-of-arrays layout the simulation uses in memory. Files of a
//! run share a stem `<name>-<total particles>-<block size>-<timesteps>`:
//!
//! - `<stem>.in`  initial state, generated once and reused
//! - `<stem>.out` final state
//! - `input/<stem>.ref` optional reference for verification

use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use nbody_core::{BLOCK_SIZE, NBodyError, ParticleBlock, Result, SimConfig, Zeroable};

/// Locations of the particle files for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticleFiles {
    dir: PathBuf,
    stem: String,
}

impl ParticleFiles {
    pub fn new(
        dir: impl Into<PathBuf>,
        name: &str,
        total_particles: usize,
        block_size: usize,
        timesteps: usize,
    ) -> Self {
        Self {
            dir: dir.into(),
            stem: format!("{name}-{total_particles}-{block_size}-{timesteps}"),
        }
    }

    pub fn for_config(config: &SimConfig) -> Self {
        Self::new(
            &config.work_dir,
            &config.name,
            config.total_particles(),
            BLOCK_SIZE,
            config.timesteps,
        )
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.join(format!("{}.in", self.stem))
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.join(format!("{}.out", self.stem))
    }

    pub fn reference_path(&self) -> PathBuf {
        self.dir.join("input").join(format!("{}.ref", self.stem))
    }
}

/// Write blocks to `path`, creating parent directories as needed
pub fn save_blocks<const B: usize>(blocks: &[ParticleBlock<B>], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(bytemuck::cast_slice(blocks))?;
    file.sync_all()?;
    Ok(())
}

/// Read exactly `n_blocks` blocks from `path`
pub fn load_blocks<const B: usize>(path: &Path, n_blocks: usize) -> Result<Vec<ParticleBlock<B>>> {
    let block_bytes = std::mem::size_of::<ParticleBlock<B>>();
    let expected = (n_blocks * block_bytes) as u64;

    let mut file = fs::File::open(path)?;
    let actual = file.metadata()?.len();
    if actual != expected {
        return Err(NBodyError::storage(
            path,
            format!("expected {expected} bytes ({n_blocks} blocks of {block_bytes}), found {actual}"),
        ));
    }

    let mut blocks = vec![ParticleBlock::<B>::zeroed(); n_blocks];
    file.read_exact(bytemuck::cast_slice_mut(&mut blocks))?;
    Ok(blocks)
}

/// Load the reference set if one exists
pub fn load_reference<const B: usize>(
    files: &ParticleFiles,
    n_blocks: usize,
) -> Result<Option<Vec<ParticleBlock<B>>>> {
    let path = files.reference_path();
    if !path.exists() {
        return Ok(None);
    }
    load_blocks(&path, n_blocks).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_blocks() -> Vec<ParticleBlock<8>> {
        let mut blocks = vec![ParticleBlock::<8>::zeroed(); 3];
        for (b, block) in blocks.iter_mut().enumerate() {
            for k in 0..8 {
                let p = (b * 8 + k) as f32;
                block.set_particle(k, [p, p * 2.0, p * 3.0], [0.5, -p, 0.0], 1.0e9 + p);
            }
        }
        blocks
    }

    #[test]
    fn test_file_naming() {
        let files = ParticleFiles::new("/data", "particles", 4096, 2048, 10);
        assert_eq!(files.stem(), "particles-4096-2048-10");
        assert_eq!(files.input_path(), PathBuf::from("/data/particles-4096-2048-10.in"));
        assert_eq!(files.output_path(), PathBuf::from("/data/particles-4096-2048-10.out"));
        assert_eq!(
            files.reference_path(),
            PathBuf::from("/data/input/particles-4096-2048-10.ref")
        );
    }

    #[test]
    fn test_for_config_uses_rounded_count() {
        let config = SimConfig { num_particles: 100, timesteps: 3, ..SimConfig::default() };
        let files = ParticleFiles::for_config(&config);
        assert_eq!(files.stem(), format!("particles-{BLOCK_SIZE}-{BLOCK_SIZE}-3"));
    }

    #[test]
    fn test_whole_block_count_keeps_requested_stem() {
        let config = SimConfig { num_particles: 2 * BLOCK_SIZE, timesteps: 10, ..SimConfig::default() };
        let files = ParticleFiles::for_config(&config);
        assert_eq!(files.stem(), format!("particles-{}-{BLOCK_SIZE}-10", 2 * BLOCK_SIZE));
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("run.out");
        let blocks = sample_blocks();

        save_blocks(&blocks, &path).unwrap();
        assert_eq!(
            fs::metadata(&path).unwrap().len() as usize,
            3 * std::mem::size_of::<ParticleBlock<8>>()
        );

        let loaded = load_blocks::<8>(&path, 3).unwrap();
        assert_eq!(loaded, blocks);
    }

    #[test]
    fn test_wrong_size_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("short.in");
        save_blocks(&sample_blocks()[..2], &path).unwrap();

        let err = load_blocks::<8>(&path, 3).unwrap_err();
        assert!(matches!(err, NBodyError::Storage { .. }), "{err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_blocks::<8>(&tmp.path().join("absent.in"), 1).unwrap_err();
        assert!(matches!(err, NBodyError::Io(_)));
    }

    #[test]
    fn test_reference_optional() {
        let tmp = TempDir::new().unwrap();
        let files = ParticleFiles::new(tmp.path(), "particles", 24, 8, 1);
        assert!(load_reference::<8>(&files, 3).unwrap().is_none());

        let blocks = sample_blocks();
        save_blocks(&blocks, &files.reference_path()).unwrap();
        assert_eq!(load_reference::<8>(&files, 3).unwrap(), Some(blocks));
    }
}
