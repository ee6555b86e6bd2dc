use std::env;
use std::io;
use std::path;
use std::process;

use mzxquest::io::{read_xquest_results, XQuestReaderConfig};
use mzxquest::{CrossLinkType, MetaDescribed};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = if args.len() > 1 {
        path::Path::new(&args[1])
    } else {
        eprintln!("Usage: {} <xquest.xml> [min-hits-per-spectrum]", args[0]);
        process::exit(1);
    };
    let min_hits = match args.get(2) {
        Some(v) => v
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?,
        None => 0,
    };
    let config = XQuestReaderConfig::new()
        .with_min_n_ions_per_spectrum(min_hits)
        .with_track_cumulative_hits(true);

    let results = read_xquest_results(path, config)?;

    if let Some(params) = results.search_parameters() {
        println!(
            "Database: {}\nEnzyme: {} ({} missed cleavages)\nPrecursor tolerance: {} {}",
            params.db,
            params.digestion_enzyme.name,
            params.missed_cleavages,
            params.precursor_mass_tolerance,
            if params.precursor_mass_tolerance_ppm() { "ppm" } else { "Da" }
        );
    }
    println!(
        "Read {} hits, kept {} spectrum searches with {} identifications",
        results.n_hits,
        results.len(),
        results.num_identifications()
    );

    let (mut cross, mut looped, mut mono, mut decoys) = (0, 0, 0, 0);
    for ident in results.iter_identifications() {
        match ident.cross_link_type() {
            Some(CrossLinkType::CrossLink) => cross += 1,
            Some(CrossLinkType::LoopLink) => looped += 1,
            Some(CrossLinkType::MonoLink) => mono += 1,
            None => {}
        }
        if ident.is_decoy() {
            decoys += 1;
        }
    }
    println!("Cross-links: {cross}, loop-links: {looped}, mono-links: {mono}, decoys: {decoys}");

    let proteins = results.proteins();
    let n_decoy_proteins = proteins.iter().filter(|p| p.is_decoy()).count();
    println!(
        "Proteins: {} ({} decoy)",
        proteins.len(),
        n_decoy_proteins
    );
    for meta in results.metas.iter() {
        if let Some(version) = meta.get_meta_value("xquest_version") {
            println!("Written by {version}");
        }
    }
    Ok(())
}
