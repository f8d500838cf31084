/// Prints a message to [`stdout`][std::io::stdout] through the global [`Shell`][crate::Shell].
#[macro_export]
macro_rules! sh_print {
    ($($args:tt)*) => {
        $crate::__sh_dispatch!(print_out $($args)*)
    };
}

/// Prints a line to [`stdout`][std::io::stdout] through the global [`Shell`][crate::Shell].
#[macro_export]
macro_rules! sh_println {
    () => {
        $crate::sh_print!("\n")
    };
    ($fmt:literal $($args:tt)*) => {
        $crate::sh_print!("{}\n", ::core::format_args!($fmt $($args)*))
    };
}

/// Prints a message to [`stderr`][std::io::stderr] through the global [`Shell`][crate::Shell].
#[macro_export]
macro_rules! sh_eprint {
    ($($args:tt)*) => {
        $crate::__sh_dispatch!(print_err $($args)*)
    };
}

/// Prints a line to [`stderr`][std::io::stderr] through the global [`Shell`][crate::Shell].
#[macro_export]
macro_rules! sh_eprintln {
    () => {
        $crate::sh_eprint!("\n")
    };
    ($fmt:literal $($args:tt)*) => {
        $crate::sh_eprint!("{}\n", ::core::format_args!($fmt $($args)*))
    };
}

/// Prints an `Error:` line to [`stderr`][std::io::stderr]. Never suppressed.
#[macro_export]
macro_rules! sh_err {
    ($($args:tt)*) => {
        $crate::__sh_dispatch!(error $($args)*)
    };
}

/// Prints a `Warning:` line to [`stderr`][std::io::stderr] unless the shell is quiet.
#[macro_export]
macro_rules! sh_warn {
    ($($args:tt)*) => {
        $crate::__sh_dispatch!(warn $($args)*)
    };
}

/// Prints an informational line to [`stdout`][std::io::stdout] unless the shell is quiet.
#[macro_export]
macro_rules! sh_note {
    ($($args:tt)*) => {
        $crate::__sh_dispatch!(note $($args)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sh_dispatch {
    ($f:ident $fmt:literal $($args:tt)*) => {
        $crate::Shell::get().$f(::core::format_args!($fmt $($args)*))
    };
}
