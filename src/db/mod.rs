pub mod students;

pub use students::StudentRepository;
