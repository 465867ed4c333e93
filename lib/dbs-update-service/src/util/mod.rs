pub mod date_of_birth;
