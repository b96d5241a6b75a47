//! magfield2 output serialization

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::coil::TargetCoil;

/// Write magfield2 coils to `path`, creating or truncating it
pub fn write_coils(path: &Path, coils: &[TargetCoil]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_coils_to(&mut writer, coils)?;
    writer.flush()?;
    tracing::debug!("Wrote {} coils to {:?}", coils.len(), path);
    Ok(())
}

/// Write magfield2 coils to a new file at `path`
///
/// Fails with `ErrorKind::AlreadyExists` if `path` is present when the file is
/// opened, so a file that appears after an earlier existence check is never
/// truncated.
pub fn create_coils(path: &Path, coils: &[TargetCoil]) -> std::io::Result<()> {
    let file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let mut writer = BufWriter::new(file);
    write_coils_to(&mut writer, coils)?;
    writer.flush()?;
    tracing::debug!("Created {:?} with {} coils", path, coils.len());
    Ok(())
}

/// Write the coil count line followed by one line per coil
pub fn write_coils_to<W: Write>(writer: &mut W, coils: &[TargetCoil]) -> std::io::Result<()> {
    writeln!(writer, "{}", coils.len())?;
    for coil in coils {
        let fields: Vec<String> = coil.columns().iter().map(|&v| fixed6(v)).collect();
        writeln!(writer, "{}", fields.join("  "))?;
    }
    Ok(())
}

/// printf-style `%f`: six decimals, lowercase non-finite names
fn fixed6(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{:.6}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed6() {
        assert_eq!(fixed6(5.0), "5.000000");
        assert_eq!(fixed6(-0.1234567), "-0.123457");
        assert_eq!(fixed6(1e7), "10000000.000000");
        assert_eq!(fixed6(f64::NAN), "nan");
        assert_eq!(fixed6(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_layout() {
        let coils = [TargetCoil {
            axial_position: 5.0,
            inner_radius: 2.0,
            wall_thickness: 1.0,
            length: 10.0,
            total_current: 10.0,
        }];
        let mut buf = Vec::new();
        write_coils_to(&mut buf, &coils).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "1\n5.000000  2.000000  1.000000  10.000000  10.000000\n"
        );
    }

    #[test]
    fn test_create_coils_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        std::fs::write(&path, "keep me").unwrap();

        let err = create_coils(&path, &[]).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_create_coils_writes_new_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        create_coils(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "0\n");
    }

    #[test]
    fn test_empty_list() {
        let mut buf = Vec::new();
        write_coils_to(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "0\n");
    }
}
