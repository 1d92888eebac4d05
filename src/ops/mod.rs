pub mod formation_ops;
