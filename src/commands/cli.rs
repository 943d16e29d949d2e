//! Command-line interface definition

use clap::{Arg, ArgAction, Command as ClapCommand};

/// Build the clap command for the vectorkit binary
pub fn build_cli() -> ClapCommand {
    ClapCommand::new("VectorKit")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Maurice Schilpp")
        .about("Analyze, merge, grid and classify vector layers")
        .arg(
            Arg::new("input")
                .help("Input GeoJSON layer(s), or a CSV elevation array with --histogram")
                .required_unless_present("extent")
                .num_args(1..)
                .action(ArgAction::Append)
                .index(1),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose console output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("grid")
                .short('g')
                .long("grid")
                .help("Generate a regular grid over the extent of the input layer")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cell-size")
                .long("cell-size")
                .help("Grid cell size in units of the layer's CRS")
                .value_name("SIZE")
                .default_value("1000")
                .required(false),
        )
        .arg(
            Arg::new("extent")
                .long("extent")
                .help("Explicit grid extent (minx,miny,maxx,maxy) instead of an input layer")
                .value_name("BBOX")
                .required(false),
        )
        .arg(
            Arg::new("epsg")
                .long("epsg")
                .help("EPSG code of the --extent coordinates")
                .value_name("CODE")
                .required(false),
        )
        .arg(
            Arg::new("merge")
                .short('m')
                .long("merge")
                .help("Merge all input layers into one")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("names")
                .long("names")
                .help("Comma-separated origin names, one per input layer")
                .value_name("NAMES")
                .required(false),
        )
        .arg(
            Arg::new("proj")
                .long("proj")
                .help("Target projection EPSG code for merged layers")
                .value_name("CODE")
                .required(false),
        )
        .arg(
            Arg::new("keep-ids")
                .long("keep-ids")
                .help("Keep original feature ids when merging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("theme")
                .short('t')
                .long("theme")
                .help("Classify the input with a thematic scheme (land_use, land_cover, hazard)")
                .value_name("NAME")
                .required(false),
        )
        .arg(
            Arg::new("theme-file")
                .long("theme-file")
                .help("Load thematic schemes from this TOML file")
                .value_name("FILE")
                .required(false),
        )
        .arg(
            Arg::new("column")
                .long("column")
                .help("Attribute column to classify, defaults to the scheme's column")
                .value_name("COLUMN")
                .required(false),
        )
        .arg(
            Arg::new("histogram")
                .long("histogram")
                .help("Compute an elevation histogram from a CSV array")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("bins")
                .long("bins")
                .help("Number of histogram bins")
                .value_name("COUNT")
                .default_value("50")
                .required(false),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_extent_replaces_input() {
        let matches = build_cli()
            .try_get_matches_from(["vectorkit", "--grid", "--extent", "0,0,10,10"])
            .unwrap();
        assert!(matches.get_flag("grid"));
        assert!(matches.get_many::<String>("input").is_none());

        assert!(build_cli().try_get_matches_from(["vectorkit", "--grid"]).is_err());
    }

    #[test]
    fn test_multiple_inputs() {
        let matches = build_cli()
            .try_get_matches_from(["vectorkit", "a.geojson", "b.geojson", "--merge"])
            .unwrap();
        let inputs: Vec<&String> = matches.get_many::<String>("input").unwrap().collect();
        assert_eq!(inputs, vec!["a.geojson", "b.geojson"]);
    }
}
