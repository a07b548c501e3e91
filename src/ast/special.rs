use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Special (built-in) scalar variables and their fixed runtime slots.
    /// Slot 0 is reserved so that 0 can mean "not a special variable".
    pub static ref SPECIAL_VAR_LOOKUP: HashMap<&'static str, usize> = {
        let mut map = HashMap::new();
        map.insert("ARGC", 1);
        map.insert("CONVFMT", 2);
        map.insert("FILENAME", 3);
        map.insert("FNR", 4);
        map.insert("FS", 5);
        map.insert("NF", 6);
        map.insert("NR", 7);
        map.insert("OFMT", 8);
        map.insert("OFS", 9);
        map.insert("ORS", 10);
        map.insert("RLENGTH", 11);
        map.insert("RS", 12);
        map.insert("RSTART", 13);
        map.insert("RT", 14);
        map.insert("SUBSEP", 15);
        map
    };
}

/// Returns the fixed slot of a special variable, or 0 if `name` is not one.
pub fn special_var_index(name: &str) -> usize {
    *SPECIAL_VAR_LOOKUP.get(name).unwrap_or(&0)
}
