use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use crate::interpreter::value::core::Value;

/// Destination of `print` statements.
pub trait OutputSink {
    /// Writes one printed value.
    fn emit(&mut self, value: &Value) -> io::Result<()>;
}

/// Writes each printed value on its own line of standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, value: &Value) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{value}")?;
        stdout.flush()
    }
}

/// Collects the rendered values in memory.
///
/// Keep a clone of the `Rc` to read the output back after running.
///
/// # Example
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use foolang::interpreter::evaluator::core::Context;
///
/// let output = Rc::new(RefCell::new(Vec::<String>::new()));
/// let mut context = Context::with_output(Rc::clone(&output));
///
/// context.run("print [1, \"a\"]; print 2.0;").unwrap();
///
/// assert_eq!(*output.borrow(), vec!["[1, \"a\"]", "2.0"]);
/// ```
impl OutputSink for Rc<RefCell<Vec<String>>> {
    fn emit(&mut self, value: &Value) -> io::Result<()> {
        self.borrow_mut().push(value.to_string());
        Ok(())
    }
}
