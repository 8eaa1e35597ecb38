use crate::averaging::error::AveragingError;
use crate::averaging::likelihood::WeightedLikelihood;
use argmin::core::{CostFunction, Executor, Gradient, State, TerminationReason, TerminationStatus};
use argmin::solver::linesearch::MoreThuenteLineSearch;
use argmin::solver::quasinewton::LBFGS;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const DEFAULT_MAX_ITER: u64 = 100;
const DEFAULT_GRAD_TOL: f64 = 1e-6;
const DEFAULT_MEMORY: usize = 10;

fn default_max_iter() -> u64 {
    DEFAULT_MAX_ITER
}

fn default_grad_tol() -> f64 {
    DEFAULT_GRAD_TOL
}

fn default_memory() -> usize {
    DEFAULT_MEMORY
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FitOptions {
    #[serde(default = "default_max_iter")]
    #[schemars(
        title = "Max Iterations",
        description = "Iteration cap for the minimizer",
        range(min = 1),
        default = "default_max_iter"
    )]
    pub max_iter: u64,

    #[serde(default = "default_grad_tol")]
    #[schemars(
        title = "Gradient Tolerance",
        description = "Convergence threshold on the gradient norm",
        default = "default_grad_tol"
    )]
    pub grad_tol: f64,

    #[serde(default = "default_memory")]
    #[schemars(
        title = "History Size",
        description = "Corrections kept for the inverse-Hessian approximation",
        range(min = 1),
        default = "default_memory"
    )]
    pub memory: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iter: DEFAULT_MAX_ITER,
            grad_tol: DEFAULT_GRAD_TOL,
            memory: DEFAULT_MEMORY,
        }
    }
}

/// Outcome of the two-parameter likelihood minimization.
///
/// Parameter errors follow the -lnL convention (errordef 0.5): the covariance
/// is the inverse of the Hessian of the minimized objective at the optimum.
#[derive(Debug, Clone, PartialEq)]
pub struct LikelihoodFit {
    /// Fitted global mean.
    pub mean: f64,
    /// Fitted extra spread, >= 0. Exactly 0 when the boundary explains the
    /// data at least as well as the interior optimum.
    pub sigma: f64,
    /// Curvature-based error of `mean`.
    pub mean_err: f64,
    /// Curvature-based error of `sigma`.
    pub sigma_err: f64,
    /// Objective value at the optimum.
    pub fval: f64,
    /// Iterations spent by the solver (0 when the seed was already stationary).
    pub n_iter: u64,
}

struct Problem<'a> {
    likelihood: &'a WeightedLikelihood,
}

impl CostFunction for Problem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        Ok(self.likelihood.neg_log_likelihood(params[0], params[1]))
    }
}

impl Gradient for Problem<'_> {
    type Param = Vec<f64>;
    type Gradient = Vec<f64>;

    fn gradient(&self, params: &Self::Param) -> Result<Self::Gradient, argmin::core::Error> {
        let [g_mean, g_sigma] = self.likelihood.gradient(params[0], params[1]);
        Ok(vec![g_mean, g_sigma])
    }
}

/// Minimizes the weighted likelihood over (mean, sigma) and extracts
/// curvature-based uncertainties at the optimum.
///
/// Seeded at the unweighted mean of the observation means and their population
/// standard deviation. The sigma >= 0 constraint is enforced by reflection:
/// the objective is even in sigma, so the solver runs unconstrained and the
/// magnitude is reported.
pub fn fit_likelihood(
    likelihood: &WeightedLikelihood,
    options: &FitOptions,
) -> Result<LikelihoodFit, AveragingError> {
    let (mean0, sigma0) = likelihood.seed();
    let [g_mean0, g_sigma0] = likelihood.gradient(mean0, sigma0);
    let seed_grad_norm = (g_mean0 * g_mean0 + g_sigma0 * g_sigma0).sqrt();

    let (mean, sigma, mut fval, n_iter) = if seed_grad_norm <= options.grad_tol {
        // The seed can already be stationary (a single observation is seeded at
        // its own mean with sigma 0); the line search cannot step from a zero
        // gradient.
        let fval = likelihood.neg_log_likelihood(mean0, sigma0);
        (mean0, sigma0, fval, 0)
    } else {
        let problem = Problem { likelihood };
        let linesearch = MoreThuenteLineSearch::new();
        let solver = LBFGS::new(linesearch, options.memory)
            .with_tolerance_grad(options.grad_tol)
            .map_err(|e| AveragingError::Optimizer(e.to_string()))?;

        let res = Executor::new(problem, solver)
            .configure(|state| state.param(vec![mean0, sigma0]).max_iters(options.max_iter))
            .run()
            .map_err(|e| AveragingError::Optimizer(e.to_string()))?;

        let state = res.state();
        let termination = state.get_termination_status();
        let converged = matches!(
            termination,
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        );
        if !converged {
            return Err(AveragingError::NotConverged {
                reason: termination.to_string(),
            });
        }

        let best = state
            .get_best_param()
            .ok_or_else(|| AveragingError::Optimizer("solver returned no parameters".into()))?;
        (best[0], best[1], state.get_best_cost(), state.get_iter())
    };

    let mut sigma = sigma.abs();
    let at_boundary = likelihood.neg_log_likelihood(mean, 0.0);
    if at_boundary <= fval + 1e-12 * fval.abs().max(1.0) {
        sigma = 0.0;
        fval = at_boundary;
    }

    let h = hessian(likelihood, mean, sigma);
    let (mean_err, sigma_err) = invert_curvature(&h)?;

    Ok(LikelihoodFit {
        mean,
        sigma,
        mean_err,
        sigma_err,
        fval,
        n_iter,
    })
}

/// Hessian of the objective at `(mean, sigma)` by forward differences of the
/// analytic gradient, symmetrized.
fn hessian(likelihood: &WeightedLikelihood, mean: f64, sigma: f64) -> [[f64; 2]; 2] {
    let x = [mean, sigma];
    let g0 = likelihood.gradient(mean, sigma);
    let mut h = [[0.0; 2]; 2];

    for j in 0..2 {
        let eps = 1e-4 * x[j].abs().max(1.0);
        let mut stepped = x;
        stepped[j] += eps;
        let g = likelihood.gradient(stepped[0], stepped[1]);
        for i in 0..2 {
            h[i][j] = (g[i] - g0[i]) / eps;
        }
    }

    let off = 0.5 * (h[0][1] + h[1][0]);
    h[0][1] = off;
    h[1][0] = off;
    h
}

/// Inverts the 2x2 curvature matrix into parameter errors, rejecting
/// non-positive-definite curvature.
fn invert_curvature(h: &[[f64; 2]; 2]) -> Result<(f64, f64), AveragingError> {
    let det = h[0][0] * h[1][1] - h[0][1] * h[1][0];
    if !(det.is_finite() && det > 0.0 && h[0][0] > 0.0) {
        return Err(AveragingError::BadCurvature);
    }
    let var_mean = h[1][1] / det;
    let var_sigma = h[0][0] / det;
    Ok((var_mean.sqrt(), var_sigma.sqrt()))
}
