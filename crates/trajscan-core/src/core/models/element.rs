use phf::phf_set;

/// The set of known chemical element symbols (H through Og).
///
/// Used to validate user-supplied element pairs before any file I/O happens,
/// so that a typo like `Cr-Bb` is rejected up front instead of silently
/// matching nothing.
static ELEMENT_SYMBOLS: phf::Set<&'static str> = phf_set! {
    "H", "He",
    "Li", "Be", "B", "C", "N", "O", "F", "Ne",
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
    "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba",
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er",
    "Tm", "Yb", "Lu",
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra",
    "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm",
    "Md", "No", "Lr",
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
};

/// Checks whether `symbol` is a known chemical element symbol.
///
/// The comparison is exact: symbols must be in their conventional
/// capitalization (e.g. `"Br"`, not `"br"` or `"BR"`).
pub fn is_known_symbol(symbol: &str) -> bool {
    ELEMENT_SYMBOLS.contains(symbol)
}

/// Normalizes a case-mangled element symbol to its conventional form.
///
/// Uppercases the first character and lowercases the rest, then validates the
/// result against the element table.
///
/// # Return
///
/// Returns `Some(symbol)` in conventional capitalization if the input names a
/// known element, otherwise `None`.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    let first = chars.next()?;
    let mut normalized = String::with_capacity(trimmed.len());
    normalized.push(first.to_ascii_uppercase());
    normalized.extend(chars.map(|c| c.to_ascii_lowercase()));
    if is_known_symbol(&normalized) {
        Some(normalized)
    } else {
        None
    }
}
