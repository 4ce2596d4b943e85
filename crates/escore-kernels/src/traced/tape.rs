//! Reverse-mode tape over scalar f64 nodes.
//!
//! Nodes are appended in evaluation order, so a single backward sweep in
//! reverse index order visits every node after all of its consumers.

/// Handle to a node on a [`Tape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Var(usize);

impl Var {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
enum Op {
    Leaf,
    Const,
    Add(usize, usize),
    Sub(usize, usize),
    Scale(usize, f64),
    Square(usize),
    Sqrt(usize),
    Sum(Vec<usize>),
}

#[derive(Debug, Clone)]
struct Node {
    op: Op,
    value: f64,
}

/// Recorded computation. Values are computed eagerly while recording.
#[derive(Debug, Default)]
pub struct Tape {
    nodes: Vec<Node>,
}

impl Tape {
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
        }
    }

    fn push(&mut self, op: Op, value: f64) -> Var {
        self.nodes.push(Node { op, value });
        Var(self.nodes.len() - 1)
    }

    /// An input that receives a gradient.
    pub fn leaf(&mut self, value: f64) -> Var {
        self.push(Op::Leaf, value)
    }

    pub fn constant(&mut self, value: f64) -> Var {
        self.push(Op::Const, value)
    }

    pub fn value(&self, var: Var) -> f64 {
        self.nodes[var.0].value
    }

    pub fn add(&mut self, a: Var, b: Var) -> Var {
        let value = self.value(a) + self.value(b);
        self.push(Op::Add(a.0, b.0), value)
    }

    pub fn sub(&mut self, a: Var, b: Var) -> Var {
        let value = self.value(a) - self.value(b);
        self.push(Op::Sub(a.0, b.0), value)
    }

    /// `a * factor` with a constant factor.
    pub fn scale(&mut self, a: Var, factor: f64) -> Var {
        let value = self.value(a) * factor;
        self.push(Op::Scale(a.0, factor), value)
    }

    pub fn square(&mut self, a: Var) -> Var {
        let v = self.value(a);
        self.push(Op::Square(a.0), v * v)
    }

    /// Square root of a clamped-at-zero argument.
    pub fn sqrt(&mut self, a: Var) -> Var {
        let value = self.value(a).max(0.0).sqrt();
        self.push(Op::Sqrt(a.0), value)
    }

    pub fn sum(&mut self, terms: &[Var]) -> Var {
        let value = terms.iter().map(|&t| self.value(t)).sum();
        self.push(Op::Sum(terms.iter().map(|t| t.0).collect()), value)
    }

    /// ‖a − b‖ over equal-length slices of nodes.
    pub fn euclidean(&mut self, a: &[Var], b: &[Var]) -> Var {
        debug_assert_eq!(a.len(), b.len());
        let squares: Vec<Var> = a
            .iter()
            .zip(b)
            .map(|(&x, &y)| {
                let diff = self.sub(x, y);
                self.square(diff)
            })
            .collect();
        let total = self.sum(&squares);
        self.sqrt(total)
    }

    /// Adjoint of `output` with respect to every node, indexed by
    /// [`Var::index`].
    pub fn backward(&self, output: Var) -> Vec<f64> {
        let mut adjoints = vec![0.0; self.nodes.len()];
        adjoints[output.0] = 1.0;

        for index in (0..=output.0).rev() {
            let adjoint = adjoints[index];
            if adjoint == 0.0 {
                continue;
            }
            match &self.nodes[index].op {
                Op::Leaf | Op::Const => {}
                Op::Add(a, b) => {
                    adjoints[*a] += adjoint;
                    adjoints[*b] += adjoint;
                }
                Op::Sub(a, b) => {
                    adjoints[*a] += adjoint;
                    adjoints[*b] -= adjoint;
                }
                Op::Scale(a, factor) => adjoints[*a] += adjoint * factor,
                Op::Square(a) => adjoints[*a] += adjoint * 2.0 * self.nodes[*a].value,
                Op::Sqrt(a) => {
                    // d√s/ds at s = 0 is taken as 0.
                    let root = self.nodes[index].value;
                    if root > 0.0 {
                        adjoints[*a] += adjoint * 0.5 / root;
                    }
                }
                Op::Sum(terms) => {
                    for &t in terms {
                        adjoints[t] += adjoint;
                    }
                }
            }
        }
        adjoints
    }
}
