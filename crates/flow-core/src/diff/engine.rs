//! Recorrido del árbol esperado contra el observado.
//!
//! El recorrido usa una pila explícita de trabajo en lugar de recursión:
//! los payloads vienen de fuentes externas con anidamiento arbitrario y la
//! profundidad solo debe estar acotada por el tamaño del input, no por el
//! call stack. Los hijos se apilan en orden inverso para que el resultado
//! sea exactamente el pre-orden del árbol esperado.
use serde_json::{json, Value};

use super::entry::{format_diffs, DiffEntry};

/// Unidad de trabajo pendiente. Las claves presentes en un solo lado no se
/// recorren: producen una única entrada en su path.
enum Task<'a> {
    Both { path: String, expected: &'a Value, actual: &'a Value },
    MissingKey { path: String, expected: &'a Value },
    ExtraKey { path: String, actual: &'a Value },
}

/// Compara dos árboles de valores y devuelve las discrepancias en pre-orden
/// del árbol esperado (claves compartidas primero en su orden, extras del
/// lado observado después, índices ascendentes). Lista vacía = match.
///
/// Reglas, en este orden de precedencia:
/// 1. valores iguales: sin entradas;
/// 2. exactamente un lado null/ausente: una entrada de ausencia en `path`;
/// 3. distinta clase (escalar vs lista vs mapa, o tipo escalar): una
///    entrada, sin descender;
/// 4. ambos mapas: unión de claves, ausencias/extras como entrada única,
///    claves compartidas recursan;
/// 5. ambas listas: largo distinto emite una sola entrada en `path` (sin
///    comparar elementos); largos iguales recursan por índice;
/// 6. escalares del mismo tipo con valor distinto: una entrada con ambos.
pub fn deep_compare(expected: &Value, actual: &Value) -> Vec<DiffEntry> {
    let mut diffs = Vec::new();
    let mut stack = vec![Task::Both { path: "$".to_string(), expected, actual }];

    while let Some(task) = stack.pop() {
        match task {
            Task::MissingKey { path, expected } => {
                diffs.push(DiffEntry { message: format!("path {path}: key missing in actual"),
                                       path,
                                       expected: Some(expected.clone()),
                                       actual: None });
            }
            Task::ExtraKey { path, actual } => {
                diffs.push(DiffEntry { message: format!("path {path}: unexpected extra key in actual"),
                                       path,
                                       expected: None,
                                       actual: Some(actual.clone()) });
            }
            Task::Both { path, expected, actual } => {
                compare_node(path, expected, actual, &mut stack, &mut diffs);
            }
        }
    }

    diffs
}

/// Variante de conveniencia: resumen formateado más bandera de igualdad.
pub fn deep_compare_str(expected: &Value, actual: &Value) -> (String, bool) {
    let diffs = deep_compare(expected, actual);
    let equal = diffs.is_empty();
    (format_diffs(&diffs), equal)
}

fn compare_node<'a>(path: String,
                    expected: &'a Value,
                    actual: &'a Value,
                    stack: &mut Vec<Task<'a>>,
                    diffs: &mut Vec<DiffEntry>) {
    match (expected, actual) {
        (Value::Null, Value::Null) => {}

        // Ausencia: null en exactamente un lado.
        (Value::Null, _) | (_, Value::Null) => {
            diffs.push(DiffEntry { message: format!("path {path}: expected {expected}, got {actual}"),
                                   path,
                                   expected: non_null(expected),
                                   actual: non_null(actual) });
        }

        (Value::Object(exp), Value::Object(act)) => {
            let mut children: Vec<Task<'a>> = Vec::with_capacity(exp.len());
            for (key, exp_val) in exp {
                let child_path = format!("{path}.{key}");
                match act.get(key) {
                    Some(act_val) => children.push(Task::Both { path: child_path,
                                                                expected: exp_val,
                                                                actual: act_val }),
                    None => children.push(Task::MissingKey { path: child_path, expected: exp_val }),
                }
            }
            for (key, act_val) in act {
                if !exp.contains_key(key) {
                    children.push(Task::ExtraKey { path: format!("{path}.{key}"), actual: act_val });
                }
            }
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
        (Value::Array(exp), Value::Array(act)) => {
            if exp.len() != act.len() {
                // Un largo distinto hace la comparación por índice sin sentido:
                // una sola entrada y no se desciende.
                diffs.push(DiffEntry { message: format!("path {path}: array length mismatch {} != {}",
                                                        exp.len(),
                                                        act.len()),
                                       path,
                                       expected: Some(json!(exp.len())),
                                       actual: Some(json!(act.len())) });
                return;
            }
            for i in (0..exp.len()).rev() {
                stack.push(Task::Both { path: format!("{path}[{i}]"),
                                        expected: &exp[i],
                                        actual: &act[i] });
            }
        }
        _ if kind_name(expected) != kind_name(actual) => {
            diffs.push(DiffEntry { message: format!("path {path}: type mismatch expected {}, got {}",
                                                    kind_name(expected),
                                                    kind_name(actual)),
                                   path,
                                   expected: Some(expected.clone()),
                                   actual: Some(actual.clone()) });
        }
        // Escalares del mismo tipo: la igualdad aquí no recursa.
        _ => {
            if !scalar_eq(expected, actual) {
                diffs.push(DiffEntry { message: format!("path {path}: value mismatch expected {expected}, got {actual}"),
                                       path,
                                       expected: Some(expected.clone()),
                                       actual: Some(actual.clone()) });
            }
        }
    }
}

/// Los números comparan por valor numérico, no por representación: `1` y
/// `1.0` del wire son el mismo valor.
fn scalar_eq(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => expected == actual,
    }
}

fn non_null(v: &Value) -> Option<Value> {
    if v.is_null() {
        None
    } else {
        Some(v.clone())
    }
}

fn kind_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
