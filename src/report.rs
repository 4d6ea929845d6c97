use crate::{cli::ShowFormat, plan::LaunchPlan};
use anyhow::Result;

pub fn build_report(plan: &LaunchPlan, format: ShowFormat) -> Result<String> {
    match format {
        ShowFormat::Text => Ok(summary(plan)),
        ShowFormat::Json => Ok(serde_json::to_string_pretty(plan)?),
    }
}

fn summary(plan: &LaunchPlan) -> String {
    let mut out = String::new();

    out.push_str("launch plan\n");
    out.push_str("===========\n");

    out.push_str(&format!("\nargv ({}):\n", plan.argv.len()));
    for (i, arg) in plan.argv.iter().enumerate() {
        out.push_str(&format!("  [{i}] {arg}\n"));
    }

    out.push_str(&format!("\nenv ({}):\n", plan.env.len()));
    for (k, v) in &plan.env {
        out.push_str(&format!("  {k}={v}\n"));
    }

    out
}
