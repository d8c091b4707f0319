//! Text output: CSV trace, CSV result line and the best-solution line.

use std::io::{self, Write};

use crate::record::{BestSolution, RunSummary, TraceRecord, TraceSink};

/// Header row of the trace CSV.
pub const TRACE_HEADER: &str = "step,energy,satisfied,unsatisfied,weight";

/// Writes trace records as CSV rows.
#[derive(Debug)]
pub struct CsvTrace<W: Write> {
    writer: W,
}

impl<W: Write> CsvTrace<W> {
    /// Wraps `writer` and writes the header row.
    pub fn new(mut writer: W) -> io::Result<Self> {
        writeln!(writer, "{TRACE_HEADER}")?;
        Ok(Self { writer })
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TraceSink for CsvTrace<W> {
    fn record(&mut self, record: &TraceRecord) -> io::Result<()> {
        writeln!(
            self.writer,
            "{},{},{},{},{}",
            record.step, record.energy, record.satisfied, record.unsatisfied, record.weight
        )
    }
}

/// Appends `instanceId,bestWeight,satisfied,unsatisfied,totalSteps`.
pub fn write_summary(mut writer: impl Write, summary: &RunSummary) -> io::Result<()> {
    writeln!(
        writer,
        "{},{},{},{},{}",
        summary.instance_id,
        summary.best_weight,
        summary.satisfied,
        summary.unsatisfied,
        summary.total_steps
    )
}

/// Writes `instanceId bestWeight` followed by the assignment as signed
/// literals and a terminating `0`.
pub fn write_best_solution(mut writer: impl Write, solution: &BestSolution) -> io::Result<()> {
    write!(writer, "{} {}", solution.instance_id, solution.best_weight)?;
    for (i, &value) in solution.assignment.iter().enumerate() {
        let var = i + 1;
        if value {
            write!(writer, " {var}")?;
        } else {
            write!(writer, " -{var}")?;
        }
    }
    writeln!(writer, " 0")
}
