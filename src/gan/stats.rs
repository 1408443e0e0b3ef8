//! Statistics tracking for GAN training.

use std::collections::VecDeque;

/// Number of recent steps kept in the loss history
const HISTORY: usize = 100;

/// Breakdown of one `evaluate_with_gradient` call
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Discriminator loss on the real minibatch
    pub real_loss: f64,
    /// Discriminator loss on the generated minibatch
    pub fake_loss: f64,
    /// Gradient penalty value (WGAN-GP only)
    pub penalty: f64,
    /// Whether the generator received a gradient this call
    pub generator_updated: bool,
}

impl StepReport {
    /// Objective value returned to the optimizer
    pub fn total(&self) -> f64 {
        self.real_loss + self.fake_loss + self.penalty
    }
}

/// Statistics from GAN training
#[derive(Debug, Clone)]
pub struct GanStats {
    /// Total gradient evaluations
    pub steps: usize,
    /// Calls on which the generator was updated
    pub generator_updates: usize,
    /// Objective values (recent history)
    pub losses: VecDeque<f64>,
    /// Most recent step
    pub last: Option<StepReport>,
}

impl Default for GanStats {
    fn default() -> Self {
        Self {
            steps: 0,
            generator_updates: 0,
            losses: VecDeque::with_capacity(HISTORY),
            last: None,
        }
    }
}

impl GanStats {
    pub fn record(&mut self, report: StepReport) {
        self.steps += 1;
        if report.generator_updated {
            self.generator_updates += 1;
        }
        if self.losses.len() == HISTORY {
            self.losses.pop_front();
        }
        self.losses.push_back(report.total());
        self.last = Some(report);
    }

    /// Mean objective over the recent history
    pub fn mean_loss(&self) -> Option<f64> {
        if self.losses.is_empty() {
            return None;
        }
        Some(self.losses.iter().sum::<f64>() / self.losses.len() as f64)
    }
}
