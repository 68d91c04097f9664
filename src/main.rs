use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::error;

use gscrypt::{
    compress, decrypt, encrypt, CompressedImage, EncryptedImage, Image, Key, OsSalt, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Encrypt,
    Compress,
    Decrypt,
}

/// Lossy image compression that commutes with encryption.
#[derive(Debug, Parser)]
struct Args {
    /// input file: an image to encrypt, a .gse to compress, or a .gsc to decrypt
    input: PathBuf,
    /// force this file to be treated as an image to encrypt
    #[arg(short = 'e', long, conflicts_with_all = ["compress", "decrypt"])]
    encrypt: bool,
    /// force this file to be treated as a half-image to compress
    #[arg(short = 'c', long, conflicts_with_all = ["encrypt", "decrypt"])]
    compress: bool,
    /// force this file to be treated as a compressed image to decrypt
    #[arg(short = 'd', long, conflicts_with_all = ["encrypt", "compress"])]
    decrypt: bool,
    /// overwrite the output file if it already exists
    #[arg(short = 'f', long)]
    force: bool,
    /// path to a binary key file (must be 16, 24, or 32 bytes)
    #[arg(short = 'k', long = "key-file", conflicts_with = "passkey")]
    key_file: Option<PathBuf>,
    /// passkey string, used as-is without key derivation
    #[arg(short = 'p', long)]
    passkey: Option<String>,
    /// output path; defaults to the input path with the mode's extension
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    /// quantization level for compression: a power of two in [1, 128]
    #[arg(short = 'q', long, default_value_t = 1)]
    quantization: u32,
}

fn infer_mode(path: &Path) -> Option<Mode> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gse") => Some(Mode::Compress),
        Some("gsc") => Some(Mode::Decrypt),
        Some("png" | "gif" | "jpg" | "jpeg") => Some(Mode::Encrypt),
        _ => None,
    }
}

fn resolve_mode(args: &Args) -> Option<Mode> {
    if args.encrypt {
        Some(Mode::Encrypt)
    } else if args.compress {
        Some(Mode::Compress)
    } else if args.decrypt {
        Some(Mode::Decrypt)
    } else {
        infer_mode(&args.input)
    }
}

fn default_output(input: &Path, mode: Mode) -> PathBuf {
    let extension = match mode {
        Mode::Encrypt => "gse",
        Mode::Compress => "gsc",
        Mode::Decrypt => "png",
    };
    input.with_extension(extension)
}

fn load_key(args: &Args) -> Result<Key> {
    match (&args.key_file, &args.passkey) {
        (Some(path), None) => Key::from_bytes(&std::fs::read(path)?),
        (None, Some(passkey)) => Key::from_passkey(passkey),
        _ => {
            // neither or both given: surface the same "bad key" shape rather
            // than inventing a new error kind for a CLI-only usage mistake
            Key::from_bytes(&[])
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mode = resolve_mode(args).unwrap_or_else(|| {
        error!("could not infer a mode from {:?}; pass -e/-c/-d explicitly", args.input);
        std::process::exit(1);
    });
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.input, mode));

    if output.exists() && !args.force {
        error!("{output:?} already exists; pass -f to overwrite");
        std::process::exit(1);
    }

    match mode {
        Mode::Encrypt => {
            let key = load_key(args)?;
            let img = Image::load(&args.input)?;
            let encrypted = encrypt(&img, &key, &mut OsSalt);
            encrypted.save(&output)?;
        }
        Mode::Compress => {
            let encrypted = EncryptedImage::load(&args.input)?;
            let compressed = compress(&encrypted, args.quantization)?;
            compressed.save(&output)?;
        }
        Mode::Decrypt => {
            let key = load_key(args)?;
            let compressed = CompressedImage::load(&args.input)?;
            let img = decrypt(&compressed, &key)?;
            img.save_png(&output)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_recognized_extension_maps_to_its_documented_mode() {
        assert_eq!(infer_mode(Path::new("photo.gse")), Some(Mode::Compress));
        assert_eq!(infer_mode(Path::new("photo.gsc")), Some(Mode::Decrypt));
        assert_eq!(infer_mode(Path::new("photo.png")), Some(Mode::Encrypt));
        assert_eq!(infer_mode(Path::new("photo.gif")), Some(Mode::Encrypt));
        assert_eq!(infer_mode(Path::new("photo.jpg")), Some(Mode::Encrypt));
        assert_eq!(infer_mode(Path::new("photo.jpeg")), Some(Mode::Encrypt));
    }

    #[test]
    fn unrecognized_extension_infers_no_mode() {
        assert_eq!(infer_mode(Path::new("photo.bmp")), None);
        assert_eq!(infer_mode(Path::new("photo")), None);
    }

    #[test]
    fn explicit_flag_overrides_extension_inference() {
        let mut args = Args::parse_from(["gscrypt", "photo.png", "--compress"]);
        assert_eq!(resolve_mode(&args), Some(Mode::Compress));
        args = Args::parse_from(["gscrypt", "photo.bmp", "--decrypt"]);
        assert_eq!(resolve_mode(&args), Some(Mode::Decrypt));
    }

    #[test]
    fn no_flag_and_unrecognized_extension_resolves_to_no_mode() {
        let args = Args::parse_from(["gscrypt", "photo.bmp"]);
        assert_eq!(resolve_mode(&args), None);
    }

    #[test]
    fn default_output_uses_the_modes_extension() {
        assert_eq!(
            default_output(Path::new("photo.png"), Mode::Encrypt),
            PathBuf::from("photo.gse")
        );
        assert_eq!(
            default_output(Path::new("photo.gse"), Mode::Compress),
            PathBuf::from("photo.gsc")
        );
        assert_eq!(
            default_output(Path::new("photo.gsc"), Mode::Decrypt),
            PathBuf::from("photo.png")
        );
    }
}
