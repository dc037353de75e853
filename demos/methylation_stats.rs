//! Prints the complete statistical comparison of the reference datasets
//!
//! Every dataset is compared twice: once with one methylation percentage per
//! clone and once with one percentage per CpG site.

use methfinder::compare::{compare_samples, compare_sites};
use methfinder::datasets;

fn main() {
    simple_logger::init_with_env().unwrap();

    for dataset in [datasets::elovl(), datasets::collagen()] {
        let (rows, cols) = dataset.control().dim();
        println!("# {} ({} clones x {} sites in control)", dataset.name(), rows, cols);
        println!("{}", dataset.control().site_labels().join("\t"));

        for result in [compare_samples(&dataset), compare_sites(&dataset)] {
            match result {
                Ok(comparison) => println!("\n{comparison}\n"),
                Err(err) => eprintln!("Unable to compare {}: {}", dataset.name(), err),
            }
        }
    }
}
