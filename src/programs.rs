//! Built-in example programs

/// A named example program
pub struct ExampleProgram {
    pub name: &'static str,
    pub lines: &'static [&'static str],
}

pub const EXAMPLE_PROGRAMS: &[ExampleProgram] = &[
    ExampleProgram {
        name: "countdown",
        lines: &["mov a 5", "inc a", "dec a", "dec a", "jnz a -1", "inc a"],
    },
    ExampleProgram {
        name: "mirror",
        lines: &["mov a -10", "mov b a", "inc a", "dec b", "jnz a -2"],
    },
    ExampleProgram {
        name: "hops",
        lines: &[
            "mov a 5", "jnz 1 3", "jnz a -1", "jnz 1 3", "dec a", "jnz 1 -3",
        ],
    },
    ExampleProgram {
        name: "multiply",
        lines: &[
            "mov a 3", "mov b 4", "mov c 0", "mov d b", "inc c", "dec d", "jnz d -2", "dec a",
            "jnz a -5",
        ],
    },
];

/// Look up an example by index
pub fn example(index: usize) -> Option<&'static ExampleProgram> {
    EXAMPLE_PROGRAMS.get(index)
}
