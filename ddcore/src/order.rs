use common::prelude::*;

/// Ordering index used for terminals: they compare below every variable.
pub(crate) const TERMINAL_INDEX: OrderIndex = OrderIndex::MAX;

/// The variable ordering fixed at factory construction. `v2i` maps a
/// variable to its position in the order, `i2v` is the inverse; the root of
/// every diagram carries the variable with the smallest position.
#[derive(Debug, Clone)]
pub struct VarOrder {
    v2i: Vec<OrderIndex>,
    i2v: Vec<VarId>,
}

impl VarOrder {
    /// Validates that `ordering` is a permutation of `0..num_vars`.
    pub fn new(num_vars: usize, ordering: &[VarId]) -> Result<Self> {
        if num_vars == 0 {
            return Err(DdError::MalformedOrdering(
                "universe must hold at least one variable".to_string(),
            ));
        }
        if ordering.len() != num_vars {
            return Err(DdError::MalformedOrdering(format!(
                "ordering lists {} variables, expected {}",
                ordering.len(),
                num_vars
            )));
        }
        let mut v2i = vec![TERMINAL_INDEX; num_vars];
        for (i, &v) in ordering.iter().enumerate() {
            if v >= num_vars {
                return Err(DdError::MalformedOrdering(format!(
                    "variable {} out of range for {} variables",
                    v, num_vars
                )));
            }
            if v2i[v] != TERMINAL_INDEX {
                return Err(DdError::MalformedOrdering(format!(
                    "variable {} listed more than once",
                    v
                )));
            }
            v2i[v] = i;
        }
        Ok(Self {
            v2i,
            i2v: ordering.to_vec(),
        })
    }

    /// The identity ordering over `num_vars` variables.
    pub fn identity(num_vars: usize) -> Result<Self> {
        let ordering: Vec<VarId> = (0..num_vars).collect();
        Self::new(num_vars, &ordering)
    }

    #[inline]
    pub fn num_vars(&self) -> usize {
        self.i2v.len()
    }

    #[inline]
    pub fn index_of(&self, var: VarId) -> OrderIndex {
        self.v2i[var]
    }

    #[inline]
    pub fn var_at(&self, index: OrderIndex) -> VarId {
        self.i2v[index]
    }

    pub fn check_var(&self, var: VarId) -> Result<()> {
        if var < self.num_vars() {
            Ok(())
        } else {
            Err(DdError::VariableOutOfRange {
                var,
                num_vars: self.num_vars(),
            })
        }
    }
}
