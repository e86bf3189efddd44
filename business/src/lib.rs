pub mod application {
    pub mod cart {
        pub mod clear_all;
        pub mod recovery;
        pub mod refresh;
        pub mod remove_line;
        pub mod select;
        pub mod set_quantity;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod value_objects;
    }
    pub mod cart {
        pub mod confirmation;
        pub mod errors;
        pub mod model;
        pub mod notifier;
        pub mod outcome;
        pub mod remote;
        pub mod store;
        pub mod use_cases {
            pub mod clear_all;
            pub mod refresh;
            pub mod remove_line;
            pub mod select;
            pub mod set_quantity;
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support;
