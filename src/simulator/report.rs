//! Simulation report generation.

use serde::Serialize;

/// Outcome of one simulated game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub frames: u64,
    pub score: u32,
    pub distance: f64,
    pub hits_taken: u32,
    /// False when the frame cap stopped the game first.
    pub game_over: bool,
}

/// Aggregated results from a batch of games.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub rules: String,
    pub num_runs: u32,
    pub runs_ended: u32,
    pub runs_capped: u32,
    pub max_frames_per_run: u64,

    pub avg_frames: f64,
    pub avg_score: f64,
    pub avg_distance: f64,
    pub avg_hits: f64,
    pub best_score: u32,
    pub longest_run: u64,

    pub runs: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(rules: &str, runs: Vec<RunStats>, max_frames_per_run: u64) -> Self {
        let n = runs.len().max(1) as f64;
        let avg = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / n;

        let runs_ended = runs.iter().filter(|r| r.game_over).count() as u32;

        Self {
            rules: rules.to_string(),
            num_runs: runs.len() as u32,
            runs_ended,
            runs_capped: runs.len() as u32 - runs_ended,
            max_frames_per_run,
            avg_frames: avg(|r| r.frames as f64),
            avg_score: avg(|r| r.score as f64),
            avg_distance: avg(|r| r.distance),
            avg_hits: avg(|r| r.hits_taken as f64),
            best_score: runs.iter().map(|r| r.score).max().unwrap_or(0),
            longest_run: runs.iter().map(|r| r.frames).max().unwrap_or(0),
            runs,
        }
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════\n");
        report.push_str("                  SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Rules: {}\nRuns: {} total, {} ended, {} hit the {}-frame cap\n\n",
            self.rules, self.num_runs, self.runs_ended, self.runs_capped, self.max_frames_per_run
        ));

        report.push_str("── SURVIVAL ───────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Frames:     {:.1}\n", self.avg_frames));
        report.push_str(&format!("  Longest Run:    {}\n", self.longest_run));
        report.push_str(&format!("  Avg Hits:       {:.2}\n", self.avg_hits));
        report.push_str(&format!("  Avg Distance:   {:.1}\n\n", self.avg_distance));

        report.push_str("── SCORE ──────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Score:      {:.2}\n", self.avg_score));
        report.push_str(&format!("  Best Score:     {}\n", self.best_score));

        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
