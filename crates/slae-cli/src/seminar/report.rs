use std::fmt;

use super::SeminarReport;

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "## {}", title)?;
    writeln!(f)
}

impl fmt::Display for SeminarReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.precision;

        writeln!(f, "# Norms, distances and conditioning of linear systems")?;

        let v = &self.vector_norms;
        heading(f, "Vector norms")?;
        writeln!(f, "x = {}", v.vector)?;
        writeln!(f, "l1 norm (sum of |x_i|):    {:.*}", p, v.l1)?;
        writeln!(f, "l2 norm (Euclidean):       {:.*}", p, v.l2)?;
        writeln!(f, "max norm (largest |x_i|):  {:.*}", p, v.max)?;

        let d = &self.distances;
        heading(f, "Distances, dot product and angle")?;
        writeln!(f, "a = {}", d.a)?;
        writeln!(f, "b = {}", d.b)?;
        writeln!(f, "l1 distance ||a - b||_1:  {:.*}", p, d.l1)?;
        writeln!(f, "l2 distance ||a - b||_2:  {:.*}", p, d.l2)?;
        writeln!(f, "dot product <a, b>:       {:.*}", p, d.dot)?;
        writeln!(f, "cos(alpha):               {:.*}", p, d.cosine)?;
        writeln!(
            f,
            "alpha:                    {:.*} rad ({:.*} deg)",
            p,
            d.angle,
            p,
            d.angle.to_degrees()
        )?;

        let m = &self.matrix_norms;
        heading(f, "Matrix norms")?;
        writeln!(f, "A =\n{}", m.matrix)?;
        writeln!(f, "1-norm (max column sum):   {:.*}", p, m.one)?;
        writeln!(f, "inf-norm (max row sum):    {:.*}", p, m.inf)?;
        writeln!(f, "2-norm (spectral):         {:.*}", p, m.two)?;
        writeln!(f, "Frobenius norm:            {:.*}", p, m.frobenius)?;

        let r = &self.roundoff;
        heading(f, "Round-off in elimination without pivoting")?;
        writeln!(f, "A =\n{:e}", DisplayExp(&r.original))?;
        writeln!(f, "L =\n{:e}", DisplayExp(&r.l))?;
        writeln!(f, "U =\n{:e}", DisplayExp(&r.u))?;
        writeln!(f, "L U =\n{:e}", DisplayExp(&r.product))?;
        writeln!(f, "max |L U - A| = {:e}", r.max_abs_error)?;

        let s = &self.system;
        let c = &s.conditioning;
        heading(f, "Conditioning")?;
        writeln!(f, "A =\n{}", s.matrix)?;
        writeln!(f, "b  = {}  ->  x  = {:.*}", s.rhs, p, s.solution)?;
        writeln!(f, "b' = {}  ->  x' = {:.*}", s.perturbed_rhs, p, s.perturbed_solution)?;
        writeln!(f, "relative change of b: {:.*}", p, s.rhs_change)?;
        writeln!(f, "relative change of x: {:.*}", p, s.solution_change)?;
        if let Some(det) = c.determinant {
            writeln!(f, "det(A) = {:.*}", p, det)?;
        }
        writeln!(f, "singular values: {:.*}", p, s.singular_values)?;
        writeln!(f, "cond_{}(A) = {:.*} ({})", c.order, p, c.cond, c.classification)?;
        writeln!(f, "up to {:.1} significant digits may be lost", c.digits_lost)?;

        let pr = &self.perturbation;
        heading(f, "Random perturbations of b")?;
        writeln!(f, "max relative error of x:  {:.*}", p, pr.max_rel_error)?;
        writeln!(f, "mean relative error of x: {:.*}", p, pr.mean_rel_error)?;
        writeln!(f, "bound cond * noise:       {:.*}", p, pr.error_bound)?;
        writeln!(f, "max amplification:        {:.*}", p, pr.max_amplification)?;

        let it = &self.iterative;
        heading(f, "Iterative solution")?;
        writeln!(
            f,
            "{} (tol {:e}, at most {} iterations)",
            self.iterative_config.method, self.iterative_config.tol, self.iterative_config.max_iter
        )?;
        writeln!(f, "status: {:?} after {} iterations", it.status, it.iterations)?;
        writeln!(f, "x (iterative) = {:.*}", p, it.x)?;
        writeln!(f, "x (direct)    = {:.*}", p, self.iterative_direct)?;
        writeln!(f, "||b - A x||   = {:e}", it.residual_norm)
    }
}

/// Prints matrix entries in scientific notation; the values span 40 orders of magnitude.
struct DisplayExp<'a>(&'a slae_linalg::math::Array2<f64>);

impl fmt::LowerExp for DisplayExp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.0;
        write!(f, "[")?;
        for r in 0..a.nrows() {
            if r > 0 {
                write!(f, "\n ")?;
            }
            let row: Vec<String> = a.row_slice(r).iter().map(|v| format!("{:e}", v)).collect();
            write!(f, "[{}]", row.join(", "))?;
        }
        write!(f, "]")
    }
}
