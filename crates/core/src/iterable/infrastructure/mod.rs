pub mod json_iterable_writer;
