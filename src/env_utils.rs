// Copyright 2024-2025 Irreducible Inc.

use std::{env, fmt::Display, str::FromStr};

pub fn get_env_var<T: FromStr + Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(val) => val.trim().parse::<T>().unwrap_or_else(|_| {
            tracing::warn!(
                "invalid '{name}' environment value: {val}, using the default value '{default}'"
            );

            default
        }),
        Err(_) => default,
    }
}

pub fn get_bool_env_var(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => parse_bool(&val).unwrap_or_else(|| {
            tracing::warn!(
                "invalid '{name}' environment value: {val}, using the default value '{default}'"
            );

            default
        }),
        Err(_) => default,
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
