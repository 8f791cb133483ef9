// File: src/persistence.rs
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Error, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::error::{AlignError, Result};
use crate::lexicon::{LexiconPaths, Lexicons};

/// Writes `path` through a temporary file in the same directory, so readers
/// never see a half-written file.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let parent_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir).map_err(|e| AlignError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| AlignError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        fill(&mut writer).map_err(|e| AlignError::io(path, e))?;
        writer.flush().map_err(|e| AlignError::io(path, e))?;
    }
    temp_file
        .persist(path)
        .map_err(|e| AlignError::io(path, e.error))?;
    Ok(())
}

/// Saves a bincode snapshot of the parsed dictionaries.
pub fn save_lexicons(lexicons: &Lexicons, path: &Path) -> Result<()> {
    write_atomic(path, |writer| {
        bincode::serialize_into(writer, lexicons).map_err(|e| Error::new(ErrorKind::Other, e))
    })
}

pub fn load_lexicons(path: &Path) -> Result<Lexicons> {
    let file = File::open(path).map_err(|e| AlignError::io(path, e))?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}

/// Loads the snapshot at `cache` if it is readable, otherwise parses the
/// text dictionaries and refreshes the snapshot.
pub fn load_or_build_lexicons(cache: &Path, paths: &LexiconPaths) -> Result<Lexicons> {
    if cache.exists() {
        match load_lexicons(cache) {
            Ok(lexicons) => {
                info!(path = %cache.display(), "loaded lexicon snapshot");
                return Ok(lexicons);
            }
            Err(e) => warn!(path = %cache.display(), error = %e, "unreadable lexicon snapshot, rebuilding"),
        }
    }
    let lexicons = Lexicons::load(paths)?;
    save_lexicons(&lexicons, cache)?;
    info!(path = %cache.display(), "saved lexicon snapshot");
    Ok(lexicons)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lexicons {
        let mut lex = Lexicons::default();
        lex.bilingual.insert_line("go\tjAnA/calanA");
        lex.controlled.insert_line("Tom\twoYma");
        lex.tam.insert("rahA_hE");
        lex.morph.insert("gayA", ["jA"]);
        lex
    }

    #[test]
    fn snapshot_round_trip_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("lexicons.bin");
        save_lexicons(&sample(), &path).unwrap();

        let loaded = load_lexicons(&path).unwrap();
        assert_eq!(loaded.bilingual.lookup("go"), ["jAnA", "calanA"]);
        assert_eq!(loaded.controlled.lookup("Tom"), Some("woYma"));
        assert!(loaded.tam.contains("rahA_hE"));
        assert_eq!(loaded.morph.roots("gayA").collect::<Vec<_>>(), ["jA"]);
    }

    #[test]
    fn corrupt_snapshot_is_rebuilt_from_text() {
        let dir = tempfile::tempdir().unwrap();
        let write = |name: &str, text: &str| {
            let p = dir.path().join(name);
            fs::write(&p, text).unwrap();
            p
        };
        let paths = LexiconPaths {
            bilingual: write("eh.txt", "house\tGara\n"),
            controlled: write("c.txt", ""),
            tam: write("tam.txt", "x wA\n"),
            morph: write("morph.txt", ""),
        };
        let cache = write("cache.bin", "not bincode");

        let lex = load_or_build_lexicons(&cache, &paths).unwrap();
        assert_eq!(lex.bilingual.lookup("house"), ["Gara"]);

        let reloaded = load_lexicons(&cache).unwrap();
        assert!(reloaded.tam.contains("wA"));
    }

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_atomic(&path, |w| w.write_all(b"first")).unwrap();
        write_atomic(&path, |w| w.write_all(b"second")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }
}
