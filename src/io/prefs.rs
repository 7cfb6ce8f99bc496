// prefs.rs: file-layer preferences.
//
// `Prefs` carries everything the file layer needs besides the paths; the CLI
// fills it from flags and environment, library users build it directly.

use crate::config::{CHUNK_SIZE_DEFAULT, NB_WORKERS_DEFAULT, NB_WORKERS_MAX};
use crate::frame::FramePrefs;

/// Preferences for [`compress_filename`](crate::io::compress_filename) and
/// [`decompress_filename`](crate::io::decompress_filename).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefs {
    /// Overwrite an existing destination instead of refusing.
    pub overwrite: bool,
    /// Worker threads; 0 = one per core.
    pub nb_workers: usize,
    /// Uncompressed bytes per frame chunk.
    pub chunk_size: usize,
    /// Bit-shuffle element width; 0 disables shuffling.
    pub elem_size: usize,
    /// Delete the source after a successful operation.
    pub remove_src_file: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Prefs {
            overwrite: false,
            nb_workers: NB_WORKERS_DEFAULT,
            chunk_size: CHUNK_SIZE_DEFAULT,
            elem_size: 0,
            remove_src_file: false,
        }
    }
}

impl Prefs {
    pub fn set_overwrite(&mut self, yes: bool) -> bool {
        self.overwrite = yes;
        self.overwrite
    }

    /// Clamped to `NB_WORKERS_MAX`.
    pub fn set_nb_workers(&mut self, n: usize) -> usize {
        self.nb_workers = n.min(NB_WORKERS_MAX);
        self.nb_workers
    }

    pub fn set_chunk_size(&mut self, size: usize) -> usize {
        self.chunk_size = size;
        self.chunk_size
    }

    pub fn set_elem_size(&mut self, size: usize) -> usize {
        self.elem_size = size;
        self.elem_size
    }

    pub fn set_remove_src_file(&mut self, yes: bool) -> bool {
        self.remove_src_file = yes;
        self.remove_src_file
    }

    pub fn frame_prefs(&self) -> FramePrefs {
        FramePrefs { chunk_size: self.chunk_size, elem_size: self.elem_size }
    }
}
