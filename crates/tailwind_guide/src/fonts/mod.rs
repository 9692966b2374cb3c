//! Font loading utilities for the `tailwind_guide` crate.
//!
//! `genpdf` measures text with real TrueType data, so every render needs a font family on disk.
//! The bundled Roboto family is searched first; when it cannot be found the common system
//! families (Liberation, DejaVu, and the Windows core fonts) are tried in turn.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled body font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Name of the bundled monospace font family.
pub const MONOSPACE_FONT_FAMILY_NAME: &str = "RobotoMono";

/// Environment variable pointing at a directory with the bundled font files.
pub const FONTS_DIR_ENV: &str = "TAILWIND_GUIDE_FONTS_DIR";

/// Environment variable pointing at a directory searched for system fallback fonts.
pub const SYSTEM_FONTS_DIR_ENV: &str = "TAILWIND_GUIDE_SYSTEM_FONTS_DIR";

const FONT_VARIANTS: [&str; 4] = ["Regular", "Bold", "Italic", "BoldItalic"];

/// File names of a font family installed outside the bundled directory.
struct SystemFamily {
    name: &'static str,
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
    directories: &'static [&'static str],
}

const SYSTEM_BODY_FAMILIES: &[SystemFamily] = &[
    SystemFamily {
        name: "Liberation Sans",
        regular: "LiberationSans-Regular.ttf",
        bold: "LiberationSans-Bold.ttf",
        italic: "LiberationSans-Italic.ttf",
        bold_italic: "LiberationSans-BoldItalic.ttf",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-sans",
            "/usr/share/fonts/liberation",
        ],
    },
    SystemFamily {
        name: "DejaVu Sans",
        regular: "DejaVuSans.ttf",
        bold: "DejaVuSans-Bold.ttf",
        italic: "DejaVuSans-Oblique.ttf",
        bold_italic: "DejaVuSans-BoldOblique.ttf",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
        ],
    },
    SystemFamily {
        name: "Arial",
        regular: "arial.ttf",
        bold: "arialbd.ttf",
        italic: "ariali.ttf",
        bold_italic: "arialbi.ttf",
        directories: &[],
    },
];

const SYSTEM_MONOSPACE_FAMILIES: &[SystemFamily] = &[
    SystemFamily {
        name: "Liberation Mono",
        regular: "LiberationMono-Regular.ttf",
        bold: "LiberationMono-Bold.ttf",
        italic: "LiberationMono-Italic.ttf",
        bold_italic: "LiberationMono-BoldItalic.ttf",
        directories: &[
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/liberation-mono",
            "/usr/share/fonts/liberation",
        ],
    },
    SystemFamily {
        name: "DejaVu Sans Mono",
        regular: "DejaVuSansMono.ttf",
        bold: "DejaVuSansMono-Bold.ttf",
        italic: "DejaVuSansMono-Oblique.ttf",
        bold_italic: "DejaVuSansMono-BoldOblique.ttf",
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
        ],
    },
    SystemFamily {
        name: "Courier New",
        regular: "cour.ttf",
        bold: "courbd.ttf",
        italic: "couri.ttf",
        bold_italic: "courbi.ttf",
        directories: &[],
    },
];

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

/// Returns the directory holding the fonts that ship with the crate sources.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = bundled_fonts_source_dir();
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

fn family_files(family_name: &str) -> Vec<String> {
    FONT_VARIANTS
        .iter()
        .map(|variant| format!("{}-{}.ttf", family_name, variant))
        .collect()
}

fn missing_font_files(path: &Path, family_name: &str) -> Vec<PathBuf> {
    family_files(family_name)
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory(family_name: &str) -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate, family_name);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate the '{}' font files. Checked: {}. Set {} to a directory containing them.",
            family_name, summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
    ))
}

fn load_bundled_family(family_name: &str) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory(family_name)?;

    fonts::from_files(&directory, family_name, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                family_name,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn system_directories(family: &SystemFamily) -> Vec<PathBuf> {
    let mut directories = Vec::new();

    if let Some(path) = env_path(SYSTEM_FONTS_DIR_ENV) {
        directories.push(path);
    }

    directories.extend(family.directories.iter().map(PathBuf::from));

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if !directories.contains(&candidate) {
                    directories.push(candidate);
                }
            }
        }
    }

    directories
}

fn load_system_font(directory: &Path, file: &str, style: &str) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load fallback {} font at {}: {}",
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_system_family(family: &SystemFamily) -> Result<FontFamily<FontData>, Error> {
    let directory = system_directories(family)
        .into_iter()
        .find(|directory| directory.join(family.regular).is_file())
        .ok_or_else(|| {
            Error::new(
                format!("System font family '{}' not found", family.name),
                io::Error::new(io::ErrorKind::NotFound, "system fonts not found"),
            )
        })?;

    debug!(
        "Loading system font family '{}' from {}",
        family.name,
        directory.display()
    );

    let regular = load_system_font(&directory, family.regular, "regular")?;
    let bold = load_system_font(&directory, family.bold, "bold")?;
    let italic = optional_system_font(&directory, family.italic, "italic", &regular);
    let bold_italic = optional_system_font(&directory, family.bold_italic, "bold italic", &bold);

    Ok(FontFamily {
        regular,
        bold,
        italic,
        bold_italic,
    })
}

// Slanted variants are often packaged separately; the upright face stands in for them.
fn optional_system_font(
    directory: &Path,
    file: &str,
    style: &str,
    upright: &FontData,
) -> FontData {
    load_system_font(directory, file, style).unwrap_or_else(|err| {
        debug!("{}; using the upright face instead", err);
        upright.clone()
    })
}

fn first_system_family(
    families: &[SystemFamily],
) -> Result<(&'static str, FontFamily<FontData>), Vec<String>> {
    let mut failures = Vec::new();
    for family in families {
        match load_system_family(family) {
            Ok(loaded) => return Ok((family.name, loaded)),
            Err(err) => failures.push(err.to_string()),
        }
    }
    Err(failures)
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the bundled Roboto family if available and falls back to the first system family
/// that can be loaded when the bundled fonts are missing.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    match load_bundled_family(DEFAULT_FONT_FAMILY_NAME) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match first_system_family(SYSTEM_BODY_FAMILIES) {
            Ok((name, fallback)) => {
                warn!(
                    "Bundled fonts unavailable ({}); falling back to system '{}' family.",
                    err, name
                );
                Ok(fallback)
            }
            Err(failures) => {
                warn!(
                    "Bundled fonts unavailable ({}); system fallbacks failed: {}",
                    err,
                    failures.join("; ")
                );
                Err(Error::new(
                    format!(
                        "Bundled fonts unavailable and no system fallback could be loaded: {}",
                        failures.join("; ")
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Returns a monospace family for code listings.
///
/// The bundled `RobotoMono-*` files are preferred, followed by the system monospace families.
pub fn monospace_font_family() -> Result<FontFamily<FontData>, Error> {
    match load_bundled_family(MONOSPACE_FONT_FAMILY_NAME) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => first_system_family(SYSTEM_MONOSPACE_FAMILIES)
            .map(|(name, family)| {
                debug!("Using system '{}' family for code listings", name);
                family
            })
            .map_err(|failures| {
                Error::new(
                    format!("No monospace font family found: {}", failures.join("; ")),
                    io::Error::new(io::ErrorKind::NotFound, "monospace fonts are not available"),
                )
            }),
        Err(err) => Err(err),
    }
}

/// Indicates whether a body font family can be loaded, either bundled or from the system.
pub fn default_fonts_available() -> bool {
    resolve_font_directory(DEFAULT_FONT_FAMILY_NAME).is_ok()
        || SYSTEM_BODY_FAMILIES.iter().any(|family| {
            system_directories(family).iter().any(|directory| {
                directory.join(family.regular).is_file() && directory.join(family.bold).is_file()
            })
        })
}
