pub mod usb_hiddev;
