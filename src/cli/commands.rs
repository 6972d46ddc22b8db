use crate::infrastructure::embeddings::clip_http::{DEFAULT_ARCH, DEFAULT_PRETRAINED};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "byovec", about = "Bring-your-own-vector ingestion and search")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Embed product images from a CSV and insert them under `img_vec`
    Ingest {
        /// CSV with at least sku, title, image_url columns
        #[arg(long)]
        csv: PathBuf,
        /// Maximum rows to read (0 = all)
        #[arg(long, default_value = "50")]
        limit: usize,
        /// CLIP model architecture
        #[arg(long, default_value = DEFAULT_ARCH)]
        arch: String,
        /// Pretrained weights tag
        #[arg(long, default_value = DEFAULT_PRETRAINED)]
        pretrain: String,
    },
    /// Recreate the collection with img_vec + txt_vec, insert two samples and query both
    Demo,
    /// Nearest-neighbour search on one named vector
    Search {
        /// Named vector to search (img_vec, txt_vec)
        #[arg(long, default_value = "img_vec")]
        target: String,
        /// Query vector as a JSON array, e.g. '[0.1,0.2,0.3,0.4]'
        #[arg(long)]
        vector: String,
        #[arg(long, default_value = "5")]
        limit: usize,
        /// Properties to return (comma separated)
        #[arg(long, value_delimiter = ',', default_value = "sku,title")]
        fields: Vec<String>,
    },
    /// Check that the vector database answers
    Ping,
}

/// Parse a JSON array of numbers into a query vector.
pub fn parse_vector(s: &str) -> Result<Vec<f32>, String> {
    let v: Vec<f32> = serde_json::from_str(s).map_err(|e| format!("Invalid vector {s:?}: {e}"))?;
    if v.is_empty() {
        return Err("Query vector is empty".into());
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ingest_defaults() {
        let cli = Cli::try_parse_from(["byovec", "ingest", "--csv", "p.csv"]).unwrap();
        match cli.command {
            Commands::Ingest { csv, limit, arch, pretrain } => {
                assert_eq!(csv, PathBuf::from("p.csv"));
                assert_eq!(limit, 50);
                assert_eq!(arch, "ViT-B-32");
                assert_eq!(pretrain, "laion2b_s34b_b79k");
            }
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_ingest_requires_csv() {
        assert!(Cli::try_parse_from(["byovec", "ingest"]).is_err());
    }

    #[test]
    fn test_search_fields_split() {
        let cli = Cli::try_parse_from([
            "byovec", "search", "--vector", "[1,2]", "--fields", "sku,caption",
        ])
        .unwrap();
        match cli.command {
            Commands::Search { target, fields, limit, .. } => {
                assert_eq!(target, "img_vec");
                assert_eq!(fields, vec!["sku", "caption"]);
                assert_eq!(limit, 5);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_parse_vector() {
        assert_eq!(parse_vector("[0.5, 1]").unwrap(), vec![0.5, 1.0]);
        assert!(parse_vector("[]").is_err());
        assert!(parse_vector("0.5,1").is_err());
    }
}
