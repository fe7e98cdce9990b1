//! Query builder for the database's HTTP interface
//!
//! Builds the `select`, filter, `order` and `limit` query parameters
//! understood by PostgREST.

/// A read against one table
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    table: &'static str,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<String>,
    limit: Option<usize>,
}

impl Select {
    /// Select every column of `table`
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Table being read
    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Columns and embedded relations to return
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    /// `column IS NOT NULL`
    pub fn not_null(mut self, column: &str) -> Self {
        self.filters
            .push((column.to_string(), "not.is.null".to_string()));
        self
    }

    /// Case-insensitive substring match on any of `columns`
    pub fn ilike_any(mut self, columns: &[&str], term: &str) -> Self {
        let term = sanitize_term(term);
        let clauses: Vec<String> = columns
            .iter()
            .map(|c| format!("{}.ilike.*{}*", c, term))
            .collect();
        self.filters
            .push(("or".to_string(), format!("({})", clauses.join(","))));
        self
    }

    /// Ascending order on `column`
    pub fn order_asc(mut self, column: &str) -> Self {
        self.order = Some(format!("{}.asc", column));
        self
    }

    /// Maximum rows
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query parameters for the request
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().cloned());
        if let Some(ref order) = self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// Filter on the primary key, for updates and deletes
pub(crate) fn id_filter(id: i64) -> Vec<(String, String)> {
    vec![("id".to_string(), format!("eq.{}", id))]
}

/// Strip characters that are reserved in a logical filter expression
pub(crate) fn sanitize_term(term: &str) -> String {
    term.chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '"' | '*' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_select_params() {
        let select = Select::new("clero")
            .columns("id")
            .eq("estado", "SP")
            .not_null("cidade")
            .order_asc("nome_completo")
            .limit(1);

        assert_eq!(select.table(), "clero");
        assert_eq!(
            select.params(),
            vec![
                pair("select", "id"),
                pair("estado", "eq.SP"),
                pair("cidade", "not.is.null"),
                pair("order", "nome_completo.asc"),
                pair("limit", "1"),
            ]
        );
    }

    #[test]
    fn test_ilike_any_strips_reserved_characters() {
        let select = Select::new("entidadeeclesiastica").ilike_any(&["nome", "cidade"], " São (Paulo), ");
        assert_eq!(
            select.params()[1],
            pair("or", "(nome.ilike.*São Paulo*,cidade.ilike.*São Paulo*)")
        );
    }

    #[test]
    fn test_sanitize_term_may_leave_nothing() {
        assert_eq!(sanitize_term(" (*), "), "");
        assert_eq!(sanitize_term("Sé\\"), "Sé");
    }

    #[test]
    fn test_id_filter() {
        assert_eq!(id_filter(42), vec![pair("id", "eq.42")]);
    }
}
