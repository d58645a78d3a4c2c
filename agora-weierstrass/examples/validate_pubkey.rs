use agora_weierstrass::parse::CurveInput;
use agora_weierstrass::{Group, GroupConfig, NamedCurve, PointSpec};
use num_bigint::BigInt;
use structopt::StructOpt;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(StructOpt)]
struct Opt {
    #[structopt(long, default_value = "secp256k1", help = "name of a standard curve")]
    curve: NamedCurve,
    #[structopt(long, help = "json curve description, overrides --curve")]
    config: Option<PathBuf>,
    #[structopt(long, help = "x coordinate as 0x prefixed hex")]
    x: String,
    #[structopt(long, help = "y coordinate as 0x prefixed hex")]
    y: String,
}

fn parse_hex(coordinate: &str) -> Result<BigInt, String> {
    BigInt::parse_bytes(coordinate.trim_start_matches("0x").as_bytes(), 16)
        .ok_or_else(|| format!("invalid coordinate {}", coordinate))
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let config = match opt.config {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let input: CurveInput = serde_json::from_reader(reader)?;
            GroupConfig::try_from(input)?
        }
        None => opt.curve.config(),
    };
    let group = Group::new(config)?;

    let point = group.new_point(PointSpec::Coordinates(parse_hex(&opt.x)?, parse_hex(&opt.y)?))?;
    println!("{} on {}", point, group);
    println!(
        "partially valid: {}",
        group.is_partially_valid_public_key(&point)
    );
    println!("fully valid: {}", group.is_valid_public_key(&point));
    Ok(())
}
