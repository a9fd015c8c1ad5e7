#![crate_name = "stegatext"]
mod error;
use crate::error::{Error, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use simple_logger::SimpleLogger;
use stegatext_core::{
    alphabet::Alphabet,
    codecs::{
        codec::{Codec, ConfigFlags, ConfigParams},
        lsb::StegaLsb,
    },
    pixel_buffer::PixelBuffer,
};
use std::io::stdin;

/// The channel visiting orders that may be selected.
#[derive(Clone, Debug, ValueEnum)]
enum TraversalArg {
    /// Raster order, starting from the top-left pixel.
    Sequential,
    /// A seeded pseudo-random order (default).
    Scatter,
}

/// Hide text within images using the low bits of each pixel
#[derive(Parser)]
#[command(name = "stegatext")]
#[command(about = "Hide text within images using the low bits of each pixel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Enable unattended mode (no user prompts).
    #[arg(long, global = true)]
    unattended: bool,
    /// Enable verbose output.
    #[arg(long, global = true)]
    verbose: bool,
}

/// Options that describe where the text lives within an image.
/// These must be the same when encoding and decoding.
#[derive(Args, Clone, Debug)]
struct LayoutArgs {
    /// The order in which the channels are visited.
    #[arg(short, long, value_enum, default_value = "scatter")]
    traversal: TraversalArg,
    /// Store data within the alpha channel too.
    #[arg(short, long)]
    alpha: bool,
    /// The number of low bits of each channel that hold data (1 or 2).
    #[arg(short, long, default_value_t = 1)]
    bits: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a string into a target image.
    #[command(visible_alias = "e")]
    Encode {
        /// Reference image path.
        #[arg(value_name = "REF_IMAGE")]
        ref_image: String,
        /// Output image path.
        #[arg(value_name = "OUTPUT_IMAGE")]
        output_image: String,
        /// Text to encode.
        #[arg(value_name = "TEXT")]
        text: String,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Overwrite the low bits (LSB replacement) instead of nudging the values.
        #[arg(long)]
        replace: bool,
        /// Disable creation of output files.
        #[arg(long)]
        no_files: bool,
    },
    /// Decode a string from a target image.
    #[command(visible_alias = "d")]
    Decode {
        /// Encoded image path.
        #[arg(value_name = "ENCODED_IMAGE")]
        encoded_image: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Encode a text file into a target image.
    #[command(visible_alias = "ef")]
    EncodeFile {
        /// Reference image path.
        #[arg(value_name = "REF_IMAGE")]
        ref_image: String,
        /// Output image path.
        #[arg(value_name = "OUTPUT_IMAGE")]
        output_image: String,
        /// Input text file path to encode.
        #[arg(value_name = "INPUT_FILE")]
        input_file: String,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Overwrite the low bits (LSB replacement) instead of nudging the values.
        #[arg(long)]
        replace: bool,
        /// Disable creation of output files.
        #[arg(long)]
        no_files: bool,
    },
    /// Decode the text within a target image into a text file.
    #[command(visible_alias = "df")]
    DecodeFile {
        /// Encoded image path.
        #[arg(value_name = "ENCODED_IMAGE")]
        encoded_image: String,
        /// Output text file path.
        #[arg(value_name = "OUTPUT_FILE")]
        output_file: String,
        #[command(flatten)]
        layout: LayoutArgs,
        /// Disable creation of output files.
        #[arg(long)]
        no_files: bool,
    },
    /// Show how much text an image can hold.
    #[command(visible_alias = "c")]
    Capacity {
        /// Image path.
        #[arg(value_name = "IMAGE")]
        image: String,
        #[command(flatten)]
        layout: LayoutArgs,
    },
    /// Show example commands
    Examples,
}

fn main() {
    if let Err(e) = SimpleLogger::new().init() {
        eprintln!("Unable to initialise the logger: {e}");
    }

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            ref_image,
            output_image,
            text,
            layout,
            replace,
            no_files,
        } => {
            let mut codec = create_codec(&layout, cli.verbose);
            apply_encode_settings(&mut codec, replace, no_files);
            handle_encode(&ref_image, &output_image, &text, &mut codec)
        }

        Commands::EncodeFile {
            ref_image,
            output_image,
            input_file,
            layout,
            replace,
            no_files,
        } => {
            let mut codec = create_codec(&layout, cli.verbose);
            apply_encode_settings(&mut codec, replace, no_files);
            handle_encode_file(&ref_image, &output_image, &input_file, &mut codec)
        }

        Commands::Decode {
            encoded_image,
            layout,
        } => {
            let mut codec = create_codec(&layout, cli.verbose);
            handle_decode(&encoded_image, &mut codec)
        }

        Commands::DecodeFile {
            encoded_image,
            output_file,
            layout,
            no_files,
        } => {
            let mut codec = create_codec(&layout, cli.verbose);
            if no_files {
                codec.set_flag_state(ConfigFlags::OutputFiles, false);
            }
            handle_decode_file(&encoded_image, &output_file, &mut codec)
        }

        Commands::Capacity { image, layout } => {
            let codec = create_codec(&layout, cli.verbose);
            handle_capacity(&image, codec.as_ref())
        }

        Commands::Examples => {
            show_examples();
            Ok(())
        }
    };

    if let Err(e) = result {
        show_abort_message(e);
        return;
    }

    if !cli.unattended {
        read_from_stdin();
    }

    std::process::exit(0);
}

/// Create a codec instance with the specified layout.
fn create_codec(layout: &LayoutArgs, verbose: bool) -> Box<dyn Codec> {
    let mut codec = Box::new(StegaLsb::new()) as Box<dyn Codec>;

    codec.set_flag_state(
        ConfigFlags::Scatter,
        matches!(layout.traversal, TraversalArg::Scatter),
    );
    codec.set_flag_state(ConfigFlags::IncludeAlpha, layout.alpha);
    codec.set_parameter(ConfigParams::BitsPerSlot(layout.bits));

    if verbose {
        codec.set_flag_state(ConfigFlags::Verbose, true);
    }

    codec
}

/// Apply codec settings for encoding operations.
fn apply_encode_settings(codec: &mut Box<dyn Codec>, replace: bool, no_files: bool) {
    if replace {
        codec.set_flag_state(ConfigFlags::LsbMatching, false);
    }
    if no_files {
        codec.set_flag_state(ConfigFlags::OutputFiles, false);
    }
}

/// Handle text encode command.
fn handle_encode(
    ref_image: &str,
    output_image: &str,
    text: &str,
    codec: &mut Box<dyn Codec>,
) -> Result<()> {
    match codec.encode(ref_image, text, output_image) {
        Ok(_) => {
            println!("The text has been successfully encoded.");
            Ok(())
        }
        Err(e) => Err(Error::Encoding(e.to_string())),
    }
}

/// Handle file encode command.
fn handle_encode_file(
    ref_image: &str,
    output_image: &str,
    input_file: &str,
    codec: &mut Box<dyn Codec>,
) -> Result<()> {
    match codec.encode_file(ref_image, input_file, output_image) {
        Ok(_) => {
            println!("The file has been successfully encoded.");
            Ok(())
        }
        Err(e) => Err(Error::Encoding(e.to_string())),
    }
}

/// Handle text decode command.
fn handle_decode(encoded_image: &str, codec: &mut Box<dyn Codec>) -> Result<()> {
    let decoded = codec
        .decode(encoded_image)
        .map_err(|e| Error::Decoding(e.to_string()))?;

    println!("{}", "-".repeat(32));
    println!("{decoded}");
    Ok(())
}

/// Handle file decode command.
fn handle_decode_file(
    encoded_image: &str,
    output_file: &str,
    codec: &mut Box<dyn Codec>,
) -> Result<()> {
    codec
        .decode_file(encoded_image, output_file)
        .map_err(|e| Error::Decoding(e.to_string()))?;

    println!("File successfully decoded to {output_file}");
    Ok(())
}

/// Handle capacity command.
fn handle_capacity(image: &str, codec: &dyn Codec) -> Result<()> {
    let buffer = PixelBuffer::load_from_file(image).map_err(|e| Error::Capacity(e.to_string()))?;
    let bits = codec
        .capacity(&buffer)
        .map_err(|e| Error::Capacity(e.to_string()))?;

    // One code is always needed for the terminator.
    let bit_width = Alphabet::standard().bit_width() as u64;
    let chars = (bits / bit_width).saturating_sub(1);

    println!(
        "{} × {} pixels: {bits} bits, or up to {chars} characters.",
        buffer.width(),
        buffer.height()
    );
    Ok(())
}

/// Read a line of text from stdin.
fn read_from_stdin() -> String {
    let mut input_string = String::new();
    if stdin().read_line(&mut input_string).is_err() {
        input_string.clear();
    }
    input_string
}

/// Display an error message.
pub fn show_abort_message(error: Error) {
    eprintln!("Error: {error}");
    std::process::exit(1);
}

/// Show the example command line arguments.
fn show_examples() {
    let split = "-".repeat(60);
    let bold = "\x1b[1m";
    let reset = "\x1b[0m";

    println!("\n{split}");
    println!("{}ENCODING EXAMPLES{}", bold, reset);
    println!("{split}");

    println!("{}Encode text into an image:{}", bold, reset);
    println!("  stegatext encode reference.png encoded.png \"A very important message.\"\n");

    println!("{}Encode a text file:{}", bold, reset);
    println!("  stegatext encode-file reference.png encoded.png input.txt\n");

    println!("{split}");
    println!("{}DECODING EXAMPLES{}", bold, reset);
    println!("{split}");

    println!("{}Decode text from an image:{}", bold, reset);
    println!("  stegatext decode encoded.png\n");

    println!("{}Decode into a text file:{}", bold, reset);
    println!("  stegatext decode-file encoded.png output.txt\n");

    println!("{split}");
    println!("{}ADVANCED OPTIONS{}", bold, reset);
    println!("{split}");

    println!("{}Show how much text an image can hold:{}", bold, reset);
    println!("  stegatext capacity reference.png --bits 2\n");

    println!(
        "{}Use raster order, the alpha channel and two bits per channel:{}",
        bold, reset
    );
    println!(
        "  stegatext encode ref.png out.png \"Text\" --traversal sequential --alpha --bits 2"
    );
    println!("  stegatext decode out.png --traversal sequential --alpha --bits 2\n");

    println!("{}Overwrite the low bits instead of nudging values:{}", bold, reset);
    println!("  stegatext encode ref.png out.png \"Text\" --replace\n");

    println!("{}Unattended mode (no prompts):{}", bold, reset);
    println!("  stegatext --unattended decode out.png\n");

    println!("{split}");
    println!(
        "{}The traversal, alpha and bits options must match when decoding.{}",
        bold, reset
    );
}
