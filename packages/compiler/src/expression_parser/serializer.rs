/**
 * Binding Expression Serializer
 *
 * Renders an AST back to binding-expression source text
 */
use super::ast::*;
use super::parser::operator_precedence;

/// Serialize AST to string
pub fn serialize(ast: &Expression) -> String {
    let mut visitor = SerializeExpressionVisitor;
    visitor.visit(ast)
}

struct SerializeExpressionVisitor;

impl SerializeExpressionVisitor {
    fn visit(&mut self, ast: &Expression) -> String {
        match ast {
            Expression::AccessThis { ancestor } => self.visit_access_this(*ancestor),
            Expression::AccessScope { name, ancestor } => self.with_ancestor(name, *ancestor),
            Expression::AccessMember { object, name } => format!("{}.{}", self.visit_operand(object), name),
            Expression::AccessKeyed { object, key } => {
                format!("{}[{}]", self.visit_operand(object), self.visit(key))
            }
            Expression::CallScope { name, args, ancestor } => {
                format!("{}({})", self.with_ancestor(name, *ancestor), self.visit_list(args))
            }
            Expression::CallMember { object, name, args } => {
                format!("{}.{}({})", self.visit_operand(object), name, self.visit_list(args))
            }
            Expression::CallFunction { func, args } => {
                format!("{}({})", self.visit_operand(func), self.visit_list(args))
            }
            Expression::PrimitiveLiteral { value } => self.visit_literal(value),
            Expression::ArrayLiteral { elements } => format!("[{}]", self.visit_list(elements)),
            Expression::ObjectLiteral { keys, values } => self.visit_object(keys, values),
            Expression::Unary { operation, expression } => {
                let separator = if operation.chars().all(|c| c.is_ascii_alphabetic()) {
                    " "
                } else {
                    ""
                };
                format!("{}{}{}", operation, separator, self.visit_operand(expression))
            }
            Expression::Binary { operation, left, right } => {
                let precedence = operator_precedence(operation).unwrap_or(0);
                format!(
                    "{} {} {}",
                    self.visit_binary_operand(left, precedence, false),
                    operation,
                    self.visit_binary_operand(right, precedence, true)
                )
            }
            Expression::Conditional { condition, yes, no } => format!(
                "{} ? {} : {}",
                self.visit_operand(condition),
                self.visit(yes),
                self.visit(no)
            ),
            Expression::Assign { target, value } => format!("{} = {}", self.visit(target), self.visit(value)),
            Expression::ValueConverter { expression, name, args } => {
                format!("{} | {}{}", self.visit(expression), name, self.visit_args(args))
            }
            Expression::BindingBehavior { expression, name, args } => {
                format!("{} & {}{}", self.visit(expression), name, self.visit_args(args))
            }
            Expression::Interpolation { parts, expressions } => self.visit_interpolation(parts, expressions),
            Expression::ForOfStatement { declaration, iterable } => {
                format!("{} of {}", self.visit(declaration), self.visit(iterable))
            }
            Expression::BindingIdentifier { name } => name.clone(),
            Expression::ArrayBindingPattern { elements } => format!("[{}]", self.visit_list(elements)),
            Expression::ObjectBindingPattern { keys, values } => self.visit_object(keys, values),
        }
    }

    /// Compound operands get parentheses so the output reparses to the same tree.
    fn visit_operand(&mut self, ast: &Expression) -> String {
        match ast {
            Expression::Binary { .. }
            | Expression::Conditional { .. }
            | Expression::Assign { .. }
            | Expression::ValueConverter { .. }
            | Expression::BindingBehavior { .. } => format!("({})", self.visit(ast)),
            _ => self.visit(ast),
        }
    }

    /// Operators bind left to right, so a right operand of equal
    /// precedence needs parentheses too.
    fn visit_binary_operand(&mut self, ast: &Expression, parent: u8, is_right: bool) -> String {
        if let Expression::Binary { operation, .. } = ast {
            let own = operator_precedence(operation).unwrap_or(0);
            if own > parent || (own == parent && !is_right) {
                return self.visit(ast);
            }
        }
        self.visit_operand(ast)
    }

    fn visit_access_this(&mut self, ancestor: u32) -> String {
        if ancestor == 0 {
            return "$this".to_string();
        }
        vec!["$parent"; ancestor as usize].join(".")
    }

    fn with_ancestor(&mut self, name: &str, ancestor: u32) -> String {
        if ancestor == 0 {
            return name.to_string();
        }
        format!("{}.{}", self.visit_access_this(ancestor), name)
    }

    fn visit_list(&mut self, list: &[Expression]) -> String {
        list.iter().map(|e| self.visit(e)).collect::<Vec<_>>().join(", ")
    }

    fn visit_args(&mut self, args: &[Expression]) -> String {
        args.iter().map(|a| format!(":{}", self.visit(a))).collect()
    }

    fn visit_object(&mut self, keys: &[String], values: &[Expression]) -> String {
        let entries = keys
            .iter()
            .zip(values)
            .map(|(k, v)| format!("{}: {}", k, self.visit(v)))
            .collect::<Vec<_>>();
        format!("{{{}}}", entries.join(", "))
    }

    fn visit_literal(&mut self, value: &Literal) -> String {
        match value {
            Literal::Undefined => "undefined".to_string(),
            Literal::Null => "null".to_string(),
            Literal::Boolean(b) => b.to_string(),
            Literal::Number(n) => n.to_string(),
            Literal::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        }
    }

    fn visit_interpolation(&mut self, parts: &[String], expressions: &[Expression]) -> String {
        let mut out = String::new();
        for (i, part) in parts.iter().enumerate() {
            out.push_str(part);
            if let Some(expression) = expressions.get(i) {
                out.push_str("${");
                out.push_str(&self.visit(expression));
                out.push('}');
            }
        }
        out
    }
}
