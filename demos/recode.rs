// This is a part of encoding-dbcs.
// Copyright (c) 2026, the encoding-dbcs developers.
// See README.md and LICENSE.txt for details.

use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use encoding_dbcs::{DecoderTrap, EncoderTrap, Encoding, Registry};
use getopts::Options;
use log::info;

fn is_utf8(name: &str) -> bool {
    matches!(&*name.to_ascii_lowercase(), "utf-8" | "utf8")
}

fn run(args: &[String]) -> Result<(), Box<dyn Error>> {
    let mut opts = Options::new();
    opts.optopt("m", "manifest", "load charsets from a manifest", "FILE");
    opts.optopt("f", "from-code", "set input encoding", "NAME");
    opts.optopt("t", "to-code", "set output encoding", "NAME");
    opts.optopt("e", "error-policy",
                "set error policy (one of strict, ignore, replace, ncr-escape)", "POLICY");
    opts.optflag("c", "", "same as `--error-policy=ignore`");
    opts.optopt("o", "output", "output file", "FILE");
    opts.optflag("h", "help", "print this help menu");

    let matches = opts.parse(args)?;
    if matches.opt_present("h") {
        println!("{}", opts.usage("Converts between double-byte legacy encodings and UTF-8."));
        return Ok(());
    }

    let registry = match matches.opt_str("m") {
        Some(path) => encoding_dbcs::config::load(path)?,
        None => Registry::with_builtins(),
    };
    info!("{} charsets available", registry.len());

    let inname = matches.opt_str("f").unwrap_or_else(|| "utf-8".to_string());
    let outname = matches.opt_str("t").unwrap_or_else(|| "utf-8".to_string());

    let mut policy = matches.opt_str("e");
    if matches.opt_present("c") {
        policy = Some("ignore".to_string());
    }
    let (intrap, outtrap) = match policy.as_deref() {
        Some("strict") | None => (DecoderTrap::Strict, EncoderTrap::Strict),
        Some("ignore") => (DecoderTrap::Ignore, EncoderTrap::Ignore),
        Some("replace") => (DecoderTrap::Replace, EncoderTrap::Replace),
        Some("ncr-escape") => (DecoderTrap::Replace, EncoderTrap::NcrEscape),
        Some(s) => return Err(format!("invalid error policy {}", s).into()),
    };

    let mut input = Vec::new();
    match matches.free.first().map(|s| &s[..]) {
        Some("-") | None => io::stdin().read_to_end(&mut input)?,
        Some(f) => File::open(f)?.read_to_end(&mut input)?,
    };

    let decoded = if is_utf8(&inname) {
        match intrap {
            DecoderTrap::Strict => String::from_utf8(input)?,
            _ => String::from_utf8_lossy(&input).into_owned(),
        }
    } else {
        let inenc = registry.lookup(&inname)?;
        inenc.decode(&input, intrap).map_err(|e| format!("decoder error: {}", e))?
    };
    let encoded = if is_utf8(&outname) {
        decoded.into_bytes()
    } else {
        let outenc = registry.lookup(&outname)?;
        outenc.encode(&decoded, outtrap).map_err(|e| format!("encoder error: {}", e))?
    };

    match matches.opt_str("o").as_deref() {
        Some("-") | None => io::stdout().write_all(&encoded)?,
        Some(f) => File::create(f)?.write_all(&encoded)?,
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("recode: {}", e);
        process::exit(1);
    }
}
