//! Print Macdonald structure-constant tables as JSON.

use clap::Parser;
use macdonald::{partitions_of, qt_kostka, ClassicalBasis, Error, McdBasis, QtParams, Registry};
use serde_json::{json, Map, Value};

#[derive(Parser)]
#[command(about = "Transition tables and qt-Kostka matrices for the Macdonald bases")]
struct Args {
    /// Degree (weight) of the graded piece.
    #[arg(short, long, default_value_t = 3)]
    degree: u32,

    /// Macdonald family: P, Q, J, H, Ht or S.
    #[arg(short, long, default_value = "H")]
    basis: String,

    /// Classical target basis: m, p, h or s.
    #[arg(short, long, default_value = "s")]
    target: String,

    /// Print the qt-Kostka matrix of the degree instead.
    #[arg(long)]
    kostka: bool,
}

fn main() -> macdonald::Result<()> {
    let args = Args::parse();

    let value = if args.kostka {
        kostka_matrix(args.degree)?
    } else {
        transition_table(&args)?
    };
    println!("{}", serde_json::to_string_pretty(&value).expect("valid json"));
    Ok(())
}

fn kostka_matrix(degree: u32) -> macdonald::Result<Value> {
    let mut rows = Map::new();
    for mu in partitions_of(degree) {
        let mut row = Map::new();
        for lambda in partitions_of(degree) {
            let coeff = qt_kostka(&lambda, &mu)?;
            if !coeff.is_zero() {
                row.insert(lambda.to_string(), Value::String(coeff.to_string()));
            }
        }
        rows.insert(mu.to_string(), Value::Object(row));
    }
    Ok(json!({ "degree": degree, "qt_kostka": rows }))
}

fn transition_table(args: &Args) -> macdonald::Result<Value> {
    let kind = match args.basis.as_str() {
        "P" => McdBasis::P,
        "Q" => McdBasis::Q,
        "J" => McdBasis::J,
        "H" => McdBasis::H,
        "Ht" => McdBasis::Ht,
        "S" => McdBasis::S,
        other => return Err(Error::Parse(format!("unknown basis {other}"))),
    };
    let target = match args.target.as_str() {
        "m" => ClassicalBasis::Monomial,
        "p" => ClassicalBasis::PowerSum,
        "h" => ClassicalBasis::Homogeneous,
        "s" => ClassicalBasis::Schur,
        other => return Err(Error::Parse(format!("unknown classical basis {other}"))),
    };

    let basis = Registry::global().basis(kind, QtParams::generic());
    let table = basis.transition_table(target, args.degree)?;
    let mut rows = Map::new();
    for (part, row) in table.rows() {
        let mut entries = Map::new();
        for (col, coeff) in row.iter() {
            entries.insert(col.to_string(), Value::String(coeff.to_string()));
        }
        rows.insert(part.to_string(), Value::Object(entries));
    }
    Ok(json!({
        "degree": args.degree,
        "from": kind.name(),
        "to": target.prefix(),
        "rows": rows,
    }))
}
