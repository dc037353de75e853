//! Finds the shortest region of an amplicon that spans a minimum number of CpG sites
//!
//! Usage: `cargo run --example find_cpg_region [SEQUENCE] [MIN_SITES]`
//!
//! Without arguments, the bisulfite-converted COL1A1 amplicon is searched for
//! 11 sites.

use std::process;

use methfinder::{find_sites, find_shortest_window, MethError, DEFAULT_MIN_SITES};

const COL1_AMPLICON: &str = "TAAACCCTAAACATATAAACTCTTTATAACTAAAATAAAAAATTAACGTCCACTCATACGTAACCTCACTCCGCATACCTCCTACTCCAACCCAAAAAAAAACTCCCATCTACTCCAACAACTAACCCAAACCCCTTTTATACTATCCTAATAAAAAACAAAAAAAAACCCTACC";

fn main() {
    simple_logger::init_with_env().unwrap();

    let mut args = std::env::args().skip(1);
    let sequence = args.next().unwrap_or_else(|| COL1_AMPLICON.to_string());
    let min_sites = match args.next().map(|s| s.parse::<usize>()) {
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            eprintln!("MIN_SITES must be a positive integer");
            process::exit(1)
        }
        None => DEFAULT_MIN_SITES,
    };

    println!("Sites: {:?}", find_sites(&sequence).as_slice());

    match find_shortest_window(&sequence, min_sites) {
        Ok(window) => {
            println!("{}", window);
            println!("{}", window.len());
        }
        Err(MethError::InsufficientSites { found, required }) => {
            println!("Not enough CpG sites in the sequence ({found} of {required}).");
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1)
        }
    }
}
