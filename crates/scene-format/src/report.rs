//! Per-line diagnostics collected while building a scene.

use bezier_kernel::KernelError;

use crate::errors::ShapeError;

/// A line that produced no shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFailure {
    /// 1-based line number in the source text.
    pub line: usize,
    pub error: ShapeError,
}

/// A line whose shape was kept but truncated to the grid bound.
#[derive(Debug, Clone, PartialEq)]
pub struct LineOverflow {
    pub line: usize,
    /// Always a `KernelError::DimensionOverflow`.
    pub overflow: KernelError,
}

/// Everything that went wrong, short of failing outright, while parsing and
/// tessellating a scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadReport {
    pub failures: Vec<LineFailure>,
    pub overflows: Vec<LineOverflow>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.overflows.is_empty()
    }

    pub fn record_failure(&mut self, line: usize, error: ShapeError) {
        self.failures.push(LineFailure { line, error });
    }

    pub fn record_overflow(&mut self, line: usize, overflow: KernelError) {
        self.overflows.push(LineOverflow { line, overflow });
    }

    /// Append another report, keeping both in line order.
    pub fn merge(&mut self, other: LoadReport) {
        self.failures.extend(other.failures);
        self.failures.sort_by_key(|f| f.line);
        self.overflows.extend(other.overflows);
        self.overflows.sort_by_key(|o| o.line);
    }

    /// Format the report as text, one diagnostic per line.
    pub fn to_text(&self) -> String {
        if self.is_clean() {
            return "Scene loaded cleanly\n".to_string();
        }
        let mut out = format!(
            "Scene loaded with {} skipped line(s) and {} clamped shape(s):\n",
            self.failures.len(),
            self.overflows.len()
        );
        for f in &self.failures {
            out.push_str(&format!("  line {}: skipped: {}\n", f.line, f.error));
        }
        for o in &self.overflows {
            out.push_str(&format!("  line {}: {}\n", o.line, o.overflow));
        }
        out
    }
}
