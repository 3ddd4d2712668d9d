//! Names every fresh [`GlobalNames`](crate::GlobalNames) starts out with.
//!
//! Passes can refer to these statically instead of looking them up. The handles are only valid
//! for tables created with the well-known set, see [`NameTableParams::well_known`](crate::NameTableParams::well_known).
#![allow(non_upper_case_globals)]

nametab_proc_macro::define_names! {
    [
        Names {
            initialize,
            call,
            new,
            self_: "<self>",
            blk: "<blk>",
            assign_temp: "<assignTemp>",
            stat_temp: "<statTemp>",
            root: "<root>",
            top: "<top>",
            block_call: "<block-call>",
            to_s,
            to_proc,
            to_ary,
            to_hash,
            method_missing,
            respond_to: "respond_to?",
            include,
            extend,
            prepend,
            attr_reader,
            attr_writer,
            attr_accessor,
            private,
            protected,
            public,
            module_function,
            sig,
            abstract_: "abstract!",
            interface: "interface!",
            sealed: "sealed!",
            lambda,
            proc,
            raise,
            require,
            super_: "super",
            nil,
            is_a: "is_a?",
            kind_of: "kind_of?",
            let_: "let",
            cast,
            must,
            unsafe_: "unsafe",
            bind,
            returns,
            params,
            void,
            untyped,
            nilable,
            any,
            all,
            class_: "class",
            singleton_class,
            block_given: "block_given?",
            each,
            map,
            hash,
            eq: "==",
            neq: "!=",
            triple_eq: "===",
            spaceship: "<=>",
            bang: "!",
            freeze,
            dig,
            fetch,
            empty: ""
        },
        Constants {
            Object,
            BasicObject,
            Kernel,
            Module,
            Class,
            Comparable,
            Enumerable,
            Struct,
            Array,
            Hash,
            Integer,
            Float,
            String,
            Symbol,
            NilClass,
            TrueClass,
            FalseClass,
            Proc,
            Exception,
            StandardError,
            T,
            Sig,
            Enum,
            Props
        }
    ]
}
