use std::io::{self, Write};

use crate::sampler::{TickOutcome, Visualizer, WindowFrame};
use crate::window::{Sample, WindowStats};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn title(stats: Option<&WindowStats>) -> String {
    match stats {
        Some(stats) => format!(
            "Ping Test (max:{}, min:{}, avg:{:.2})",
            stats.max, stats.min, stats.average
        ),
        None => "Ping Test (max:--, min:--, avg:--)".to_string(),
    }
}

/// One glyph per sample, scaled against the window maximum.
pub fn sparkline(samples: &[Sample]) -> String {
    let ceiling = samples
        .iter()
        .map(|s| s.latency_ms)
        .fold(0.0f64, f64::max);
    if ceiling <= 0.0 {
        return SPARK_LEVELS[0].to_string().repeat(samples.len());
    }

    let top = (SPARK_LEVELS.len() - 1) as f64;
    samples
        .iter()
        .map(|s| {
            let level = ((s.latency_ms / ceiling) * top).round() as usize;
            SPARK_LEVELS[level.min(SPARK_LEVELS.len() - 1)]
        })
        .collect()
}

fn describe_outcome(outcome: &TickOutcome) -> String {
    match outcome {
        TickOutcome::Sampled { index, latency_ms } => format!("#{} {} ms", index, latency_ms),
        TickOutcome::NoData => "no data".to_string(),
        TickOutcome::ProbeFailed { reason } => format!("probe failed: {}", reason),
    }
}

/// Plain-text status line per tick.
pub struct ConsoleVisualizer<W> {
    out: W,
}

impl<W: Write + Send> ConsoleVisualizer<W> {
    pub fn new(out: W) -> Self {
        ConsoleVisualizer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Visualizer for ConsoleVisualizer<W> {
    fn render(&mut self, frame: &WindowFrame) -> io::Result<()> {
        writeln!(
            self.out,
            "[{:>5}] {} {} | {}",
            frame.tick,
            title(frame.stats.as_ref()),
            sparkline(&frame.samples),
            describe_outcome(&frame.outcome)
        )?;
        self.out.flush()
    }
}

/// Emits every frame as one JSON document per line.
pub struct JsonLinesVisualizer<W> {
    out: W,
}

impl<W: Write + Send> JsonLinesVisualizer<W> {
    pub fn new(out: W) -> Self {
        JsonLinesVisualizer { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Visualizer for JsonLinesVisualizer<W> {
    fn render(&mut self, frame: &WindowFrame) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}
