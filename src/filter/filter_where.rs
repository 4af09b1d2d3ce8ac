use serde_json::Value;

use super::error::FilterError;

/// Compiles a JSON where-clause into a SQL predicate with positional params.
///
/// Supported shapes:
/// - implicit equality: `{ "sport": "soccer" }`
/// - operator objects: `{ "age": { "$gte": 16 } }`
/// - logical groups: `{ "$and": [ ... ] }`, `{ "$or": [ ... ] }`, `{ "$not": { ... } }`
pub struct FilterWhere {
    params: Vec<Value>,
}

impl FilterWhere {
    pub fn generate(where_data: &Value) -> Result<(String, Vec<Value>), FilterError> {
        let mut builder = Self { params: vec![] };
        let sql = builder.build_group(where_data)?;
        let sql = if sql.is_empty() { "1=1".to_string() } else { sql };
        Ok((sql, builder.params))
    }

    pub fn validate(where_data: &Value) -> Result<(), FilterError> {
        if where_data.is_null() {
            return Ok(());
        }
        match where_data {
            Value::Object(_) => Ok(()),
            _ => Err(FilterError::InvalidWhereClause(
                "WHERE must be a JSON object".to_string(),
            )),
        }
    }

    fn build_group(&mut self, where_data: &Value) -> Result<String, FilterError> {
        let obj = match where_data {
            Value::Object(obj) => obj,
            Value::Null => return Ok(String::new()),
            _ => {
                return Err(FilterError::InvalidWhereClause(
                    "WHERE must be a JSON object".to_string(),
                ))
            }
        };

        let mut conditions = Vec::new();
        for (key, value) in obj {
            if key.starts_with('$') {
                conditions.push(self.build_logical(key, value)?);
            } else {
                Self::validate_column(key)?;
                conditions.push(self.build_field(key, value)?);
            }
        }
        Ok(conditions.join(" AND "))
    }

    fn build_logical(&mut self, op: &str, value: &Value) -> Result<String, FilterError> {
        match op {
            "$and" | "$or" => {
                let arr = value.as_array().ok_or_else(|| {
                    FilterError::InvalidOperatorData(format!("{} requires an array", op))
                })?;
                let mut parts = Vec::new();
                for clause in arr {
                    let sql = self.build_group(clause)?;
                    if !sql.is_empty() {
                        parts.push(format!("({})", sql));
                    }
                }
                if parts.is_empty() {
                    return Ok("1=1".to_string());
                }
                let joiner = if op == "$and" { " AND " } else { " OR " };
                Ok(format!("({})", parts.join(joiner)))
            }
            "$not" => {
                let sql = self.build_group(value)?;
                Ok(format!("NOT ({})", sql))
            }
            other => Err(FilterError::UnsupportedOperator(other.to_string())),
        }
    }

    fn build_field(&mut self, field: &str, value: &Value) -> Result<String, FilterError> {
        let quoted = format!("\"{}\"", field);

        if let Value::Object(ops) = value {
            let mut parts = Vec::new();
            for (op_key, op_val) in ops {
                parts.push(self.build_operator(&quoted, op_key, op_val)?);
            }
            return Ok(parts.join(" AND "));
        }

        // Implicit equality: { field: value }
        if value.is_null() {
            Ok(format!("{} IS NULL", quoted))
        } else {
            Ok(format!("{} = {}", quoted, self.param(value.clone())))
        }
    }

    fn build_operator(
        &mut self,
        quoted_column: &str,
        op_key: &str,
        data: &Value,
    ) -> Result<String, FilterError> {
        match op_key {
            "$eq" => {
                if data.is_null() {
                    Ok(format!("{} IS NULL", quoted_column))
                } else {
                    Ok(format!("{} = {}", quoted_column, self.param(data.clone())))
                }
            }
            "$ne" | "$neq" => {
                if data.is_null() {
                    Ok(format!("{} IS NOT NULL", quoted_column))
                } else {
                    Ok(format!("{} <> {}", quoted_column, self.param(data.clone())))
                }
            }
            "$gt" => Ok(format!("{} > {}", quoted_column, self.param(data.clone()))),
            "$gte" => Ok(format!("{} >= {}", quoted_column, self.param(data.clone()))),
            "$lt" => Ok(format!("{} < {}", quoted_column, self.param(data.clone()))),
            "$lte" => Ok(format!("{} <= {}", quoted_column, self.param(data.clone()))),
            "$like" => Ok(format!("{} LIKE {}", quoted_column, self.param(data.clone()))),
            "$ilike" => Ok(format!("{} ILIKE {}", quoted_column, self.param(data.clone()))),
            "$in" => self.build_in(quoted_column, data, false),
            "$nin" => self.build_in(quoted_column, data, true),
            "$null" => match data.as_bool() {
                Some(true) => Ok(format!("{} IS NULL", quoted_column)),
                Some(false) => Ok(format!("{} IS NOT NULL", quoted_column)),
                None => Err(FilterError::InvalidOperatorData(
                    "$null requires a boolean".to_string(),
                )),
            },
            other => Err(FilterError::UnsupportedOperator(other.to_string())),
        }
    }

    fn build_in(
        &mut self,
        quoted_column: &str,
        data: &Value,
        negated: bool,
    ) -> Result<String, FilterError> {
        let values = match data {
            Value::Array(values) => values,
            _ => {
                return Err(FilterError::InvalidOperatorData(
                    "$in/$nin require an array".to_string(),
                ))
            }
        };
        if values.is_empty() {
            // Empty IN list matches nothing; empty NOT IN matches everything
            return Ok(if negated { "1=1".to_string() } else { "1=0".to_string() });
        }
        let params: Vec<String> = values.iter().map(|v| self.param(v.clone())).collect();
        let keyword = if negated { "NOT IN" } else { "IN" };
        Ok(format!(
            "{} {} ({})",
            quoted_column,
            keyword,
            params.join(", ")
        ))
    }

    fn validate_column(column: &str) -> Result<(), FilterError> {
        let mut chars = column.chars();
        let valid_first = matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_');
        if !valid_first || !column.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(FilterError::InvalidColumn(format!(
                "Invalid column name format: {}",
                column
            )));
        }
        Ok(())
    }

    fn param(&mut self, value: Value) -> String {
        self.params.push(value);
        format!("${}", self.params.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn implicit_equality() {
        let (sql, params) = FilterWhere::generate(&json!({ "sport": "soccer" })).unwrap();
        assert_eq!(sql, "\"sport\" = $1");
        assert_eq!(params, vec![json!("soccer")]);
    }

    #[test]
    fn and_group_numbers_params_sequentially() {
        let clause = json!({ "$and": [
            { "organization_id": "org-1" },
            { "age": { "$gte": 16 } }
        ]});
        let (sql, params) = FilterWhere::generate(&clause).unwrap();
        assert_eq!(sql, "((\"organization_id\" = $1) AND (\"age\" >= $2))");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn in_expands_to_param_list() {
        let (sql, params) =
            FilterWhere::generate(&json!({ "sport": { "$in": ["soccer", "hockey"] } })).unwrap();
        assert_eq!(sql, "\"sport\" IN ($1, $2)");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn empty_in_matches_nothing() {
        let (sql, _) = FilterWhere::generate(&json!({ "sport": { "$in": [] } })).unwrap();
        assert_eq!(sql, "1=0");
    }

    #[test]
    fn null_equality_becomes_is_null() {
        let (sql, _) = FilterWhere::generate(&json!({ "organization_id": null })).unwrap();
        assert_eq!(sql, "\"organization_id\" IS NULL");
    }

    #[test]
    fn invalid_column_names_are_rejected() {
        let result = FilterWhere::generate(&json!({ "sport; DROP TABLE": "x" }));
        assert!(matches!(result, Err(FilterError::InvalidColumn(_))));
    }

    #[test]
    fn unknown_operators_are_rejected() {
        let result = FilterWhere::generate(&json!({ "sport": { "$regex": ".*" } }));
        assert!(matches!(result, Err(FilterError::UnsupportedOperator(_))));
    }
}
