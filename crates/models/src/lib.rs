pub mod errors;
pub mod db;
pub mod enrollment;

#[cfg(test)]
mod tests;
