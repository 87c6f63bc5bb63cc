use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<String> {
    let mut hints = Vec::new();

    if let Some(io_err) = err.downcast_ref::<lmpio::Error>() {
        io_hints(io_err, &mut hints);
    } else if let Some(proj_err) = err.downcast_ref::<lmpio::ProjectionError>() {
        projection_hints(proj_err, &mut hints);
    }

    hints
}

fn io_hints(err: &lmpio::Error, hints: &mut Vec<String>) {
    use lmpio::Error as IoError;

    match err {
        IoError::Io { source } => std_io_hints(source, hints),

        IoError::FileNotFound { .. } => {
            hints.push("Check the path spelling and ensure the file exists".into());
        }

        IoError::MalformedHeader { line, .. } => {
            hints.push(format!("Inspect the ITEM: block header near line {}", line));
            hints.push("Every snapshot must list the same atom count and columns".into());
        }

        IoError::Parse { format, line, .. } => {
            hints.push(format!(
                "Inspect the file around line {} for malformed {} entries",
                line, format
            ));
            if *format == lmpio::Format::Custom {
                hints.push("Files not ending in .xyz are read as custom dumps".into());
            }
        }

        IoError::ShortSnapshot { .. } => {
            hints.push("The file may be truncated while a dump was still running".into());
        }

        IoError::EmptyTrajectory { .. } => {
            hints.push("Verify the input contains at least one snapshot".into());
        }

        IoError::InconsistentShape(_) | IoError::MalformedInput(_) => {
            hints.push("The data handed to the writer does not match its metadata".into());
        }

        IoError::CacheCorrupt { path, .. } => {
            hints.push(format!("Delete '{}' and run `lmpio cache`", path.display()));
        }

        IoError::Projection(inner) => projection_hints(inner, hints),
    }
}

fn projection_hints(err: &lmpio::ProjectionError, hints: &mut Vec<String>) {
    use lmpio::ProjectionError;

    match err {
        ProjectionError::MissingField { .. } => {
            hints.push("Check the ITEM: ATOMS line of the input for the column names".into());
        }
        ProjectionError::NonIntegerId { .. } => {
            hints.push("The id column must hold whole numbers".into());
        }
        _ => {}
    }
}

fn std_io_hints(source: &std::io::Error, hints: &mut Vec<String>) {
    use std::io::ErrorKind;

    match source.kind() {
        ErrorKind::PermissionDenied => {
            hints.push("Check file permissions with `ls -la`".into());
            hints.push("The cache sidecar is written next to the input file".into());
        }
        ErrorKind::WriteZero | ErrorKind::StorageFull => {
            hints.push("Check available disk space".into());
        }
        ErrorKind::BrokenPipe => {
            hints.push("Output consumer terminated (e.g. piping into `head`)".into());
        }
        _ => {}
    }
}
