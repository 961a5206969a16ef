use std::fmt::Write;

use crate::parser::Statement;

const INDENT: usize = 4;

fn line(out: &mut String, depth: usize, text: std::fmt::Arguments<'_>) {
    // Writing into a String never fails
    let _ = writeln!(out, "{:width$}{text}", "", width = depth * INDENT);
}

fn render_at(out: &mut String, s: &Statement, depth: usize) {
    match s {
        Statement::Block(children) => {
            for child in children {
                render_at(out, child, depth);
            }
        }
        Statement::If { condition, body } => {
            line(out, depth, format_args!("IF {} THEN", condition.as_token()));
            render_at(out, body, depth + 1);
            line(out, depth, format_args!("END IF"));
        }
        Statement::IfElse {
            condition,
            then_body,
            else_body,
        } => {
            line(out, depth, format_args!("IF {} THEN", condition.as_token()));
            render_at(out, then_body, depth + 1);
            line(out, depth, format_args!("ELSE"));
            render_at(out, else_body, depth + 1);
            line(out, depth, format_args!("END IF"));
        }
        Statement::While { condition, body } => {
            line(out, depth, format_args!("WHILE {} DO", condition.as_token()));
            render_at(out, body, depth + 1);
            line(out, depth, format_args!("END WHILE"));
        }
        Statement::Call { name } => line(out, depth, format_args!("{name}")),
    }
}

/// Renders `tree` back into BL source, one construct per line, indented four spaces per level.
pub fn render(tree: &Statement) -> String {
    let mut out = String::new();
    render_at(&mut out, tree, 0);
    out
}

pub fn pretty_print(tree: &Statement) {
    print!("{}", render(tree));
}
