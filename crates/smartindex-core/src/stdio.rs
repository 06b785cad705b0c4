use crate::wasm::WasmHost;
use smartindex_support::host::HostEnv;
pub use std::fmt::{Error, Write};

pub struct Stdout(());

impl Write for Stdout {
    fn write_str(&mut self, s: &str) -> Result<(), Error> {
        WasmHost.log(s);
        Ok(())
    }
}

pub fn stdout() -> Stdout {
    Stdout(())
}

#[macro_export]
macro_rules! println {
  ( $( $x:tt )* ) => {
    {
      writeln!($crate::stdio::stdout(), $($x)*).unwrap();
    }
  }
}

#[macro_export]
macro_rules! print {
  ( $( $x:tt )* ) => {
    {
      write!($crate::stdio::stdout(), $($x)*).unwrap();
    }
  }
}
