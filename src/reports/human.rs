//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::LoopReportGenerator;
use crate::cycles::CycleEnumerator;
use crate::error::GyreError;

pub struct HumanReportGenerator {
    max_loops: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_loops: Option<usize>) -> Self {
        Self { max_loops }
    }
}

impl LoopReportGenerator for HumanReportGenerator {
    fn generate_report(&self, enumerator: &CycleEnumerator) -> Result<String, GyreError> {
        let mut output = String::new();

        if !enumerator.has_loops() {
            write!(
                output,
                "\n{} No elementary cycles found. The graph is acyclic under the applied \
                 edge filter.\n",
                style("✅").green().bold()
            )?;
            return Ok(output);
        }

        let total = enumerator.loop_count();
        write!(
            output,
            "\n{} Found {} elementary {}:\n\n",
            style("🔄").yellow().bold(),
            style(total).bold(),
            if total == 1 { "cycle" } else { "cycles" }
        )?;

        let shown = self.max_loops.unwrap_or(total).min(total);
        for (position, cycle) in enumerator.loops().iter().take(shown).enumerate() {
            writeln!(
                output,
                "  {} Cycle #{}: {}{}",
                style("•").dim(),
                position + 1,
                style(cycle).bold(),
                if cycle.is_self_loop() {
                    " (self-loop)"
                } else {
                    ""
                }
            )?;
        }

        if shown < total {
            writeln!(
                output,
                "\n{} Showing {} of {} cycles.",
                style("ℹ️").blue(),
                shown,
                total
            )?;
        }

        Ok(output)
    }
}
