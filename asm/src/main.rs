use color_print::cformat;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.sv")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.sv.bin")]
    output: String,

    /// Match label and constant names exactly instead of folding case
    #[clap(short, long)]
    case_sensitive: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("SV64 Assembler");
    println!("  < {}", args.input);

    let source = std::fs::read_to_string(&args.input)
        .expect(&cformat!("<r,s>Failed to open file</>: {}", args.input));

    match svasm::assemble(&source, args.case_sensitive) {
        Ok(bytes) => {
            std::fs::write(&args.output, &bytes)
                .expect(&cformat!("<r,s>Failed to write file</>: {}", args.output));
            println!("  > {} ({} bytes)", args.output, bytes.len());
        }
        Err(err) => {
            err.diag(&args.input);
            std::process::exit(1);
        }
    }
}
