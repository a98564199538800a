use std::{
    fs::File,
    io::{BufWriter, Write},
};

use crate::{Error, Result, TourOptions, tour::TourPlan};

/// Writes `plan` as pretty JSON to `--output` or stdout.
pub fn write_plan(plan: &TourPlan, options: &TourOptions) -> Result<()> {
    match options.output_path() {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                Error::other(format!(
                    "failed to create output file {}: {e}",
                    path.display()
                ))
            })?;
            write_json(plan, BufWriter::new(file))?;
            log::debug!("output: wrote plan to {}", path.display());
        }
        None => write_json(plan, std::io::stdout().lock())?,
    }
    Ok(())
}

fn write_json<W: Write>(plan: &TourPlan, mut out: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, plan)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_plan;
    use crate::{TourOptions, tour::TourPlan};

    #[test]
    fn writes_plan_json_to_output_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("plan.json");
        let options = TourOptions {
            output: path.display().to_string(),
            ..TourOptions::default()
        };
        let plan = TourPlan {
            order: vec![2, 0, 1],
            message: Some("note".to_string()),
            ..TourPlan::default()
        };

        write_plan(&plan, &options).expect("write");

        let text = std::fs::read_to_string(&path).expect("read back");
        let json: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(json["order"], serde_json::json!([2, 0, 1]));
        assert_eq!(json["message"], "note");
    }
}
