pub mod ros2;
