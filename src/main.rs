pub mod grammar;
use grammar::RecursiveParser;
use std::{fs, io::BufRead};

pub use grammar::Grammar;

fn print_help() {
    println!("Usage: grammar-analyzer outputs [options] [grammar file]");
    println!("outputs:");
    println!("  prod: Productions");
    println!("  nff: Nullable first and follow");
    println!("  ll1: LL(1) verdict");
    println!("  parse: Parse tree for the -e input");
    println!("options:");
    println!("  -h: Print this help");
    println!("  -e <input>: Input string for parse");
    println!("  -l: Print in LaTeX format");
    println!("  -j: Print in JSON format");
}

fn main() {
    let mut outputs: Vec<&str> = Vec::new();
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    let mut i: usize = 0;
    while i < args.len() && ["prod", "nff", "ll1", "parse"].contains(&args[i].as_str()) {
        outputs.push(args[i].as_str());
        i += 1;
    }

    enum OutputFormat {
        Plain,
        LaTeX,
        Json,
    }
    let mut output_format = OutputFormat::Plain;
    let mut parse_input: Option<&str> = None;

    while i < args.len() && ["-h", "--help", "-l", "-j", "-e"].contains(&args[i].as_str()) {
        if args[i] == "-h" || args[i] == "--help" {
            print_help();
            return;
        } else if args[i] == "-l" {
            output_format = OutputFormat::LaTeX;
        } else if args[i] == "-j" {
            output_format = OutputFormat::Json;
        } else if args[i] == "-e" {
            i += 1;
            if i >= args.len() {
                print_help();
                return;
            }
            parse_input = Some(args[i].as_str());
        }
        i += 1;
    }

    if i + 1 < args.len() || outputs.len() < 1 {
        print_help();
        return;
    }

    let input: String = if i == args.len() {
        std::io::stdin()
            .lock()
            .lines()
            .map(|l| l.unwrap())
            .collect::<Vec<String>>()
            .join("\n")
    } else {
        fs::read_to_string(args[i].as_str()).expect("Failed to read file")
    };

    let mut g = Grammar::parse(&input).unwrap();
    if let Err(e) = g.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    g.calculate_nullable_first_follow();

    for output in outputs {
        if output == "prod" {
            let t = g.to_production_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "nff" {
            let t = g.to_non_terminal_output_vec();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "ll1" {
            let t = g.to_ll1_output();
            println!(
                "{}",
                match output_format {
                    OutputFormat::Plain => t.to_plaintext(),
                    OutputFormat::LaTeX => t.to_latex(),
                    OutputFormat::Json => serde_json::to_string(&t).unwrap(),
                }
            );
        }
        if output == "parse" {
            let to_parse = match parse_input {
                Some(s) => s,
                None => {
                    print_help();
                    return;
                }
            };
            let mut parser = RecursiveParser::new(&g);
            match parser.parse(to_parse) {
                Ok(tree) => println!(
                    "{}",
                    match output_format {
                        OutputFormat::Json => serde_json::to_string(&tree).unwrap(),
                        _ => tree.to_plaintext(&g),
                    }
                ),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
