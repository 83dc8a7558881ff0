use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Which bulk-delete tier completed without error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EstrategiaPurga {
    /// DELETE with a trivially-true filter
    Filtrada,
    /// Unconditional TRUNCATE
    Incondicional,
    /// Per-record DELETE loop over every known id
    PorRegistro,
}

/// Outcome of a bulk delete across all three tiers.
///
/// `estrategia` is `None` when every tier reported an error. The count of
/// remaining rows is read after the attempts, so a purge can still be
/// confirmed when the backend deleted the rows despite reporting errors.
#[derive(Debug, Clone)]
pub struct ResultadoPurga {
    pub estrategia: Option<EstrategiaPurga>,
    pub eliminadas: u64,
    pub restantes: i64,
}

impl ResultadoPurga {
    /// A purge counts as successful only when some tier completed
    /// error-free, or the post-delete count confirms zero remaining rows.
    pub fn confirmada(&self) -> bool {
        self.estrategia.is_some() || self.restantes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn una_tier_exitosa_confirma_la_purga() {
        let resultado = ResultadoPurga {
            estrategia: Some(EstrategiaPurga::Filtrada),
            eliminadas: 12,
            restantes: 0,
        };
        assert!(resultado.confirmada());
    }

    #[test]
    fn sin_tier_exitosa_pero_tabla_vacia_confirma() {
        // The backend deleted the rows even though every call errored
        let resultado = ResultadoPurga {
            estrategia: None,
            eliminadas: 0,
            restantes: 0,
        };
        assert!(resultado.confirmada());
    }

    #[test]
    fn tres_tiers_con_error_y_filas_restantes_no_confirma() {
        // The original reported success here; the redesign refuses to
        let resultado = ResultadoPurga {
            estrategia: None,
            eliminadas: 0,
            restantes: 3,
        };
        assert!(!resultado.confirmada());
    }
}
